use std::fmt;

use serde::{
    de::{Error, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};

/// An object id as it appears on the wire. The API usually sends ids as strings, but some
/// endpoints (e.g. the access token exchange) send them as JSON numbers.
#[derive(Clone, Debug)]
pub(crate) struct IdString(pub(crate) Box<str>);

impl Serialize for IdString {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for IdString {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(IdStringVisitor)
    }
}

struct IdStringVisitor;

impl<'de> Visitor<'de> for IdStringVisitor {
    type Value = IdString;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an id string or an integer id")
    }

    fn visit_i64<E: Error>(self, v: i64) -> Result<Self::Value, E> {
        u64::try_from(v)
            .map_err(|_| E::custom(format!("id is negative: {}", v)))
            .and_then(|v| self.visit_u64(v))
    }

    fn visit_i128<E: Error>(self, v: i128) -> Result<Self::Value, E> {
        u128::try_from(v)
            .map_err(|_| E::custom(format!("id is negative: {}", v)))
            .and_then(|v| self.visit_u128(v))
    }

    fn visit_u64<E: Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(IdString(v.to_string().into_boxed_str()))
    }

    fn visit_u128<E: Error>(self, v: u128) -> Result<Self::Value, E> {
        Ok(IdString(v.to_string().into_boxed_str()))
    }

    fn visit_f64<E: Error>(self, v: f64) -> Result<Self::Value, E> {
        // Large ids can arrive as floats from some JSON encoders; only accept whole numbers.
        if !(v.is_finite() && v.fract() == 0.0) {
            Err(E::custom(format!("id is not a whole number: {}", v)))
        } else if v < 0.0 {
            Err(E::custom(format!("id is negative: {}", v)))
        } else {
            Ok(IdString(format!("{:.0}", v).into_boxed_str()))
        }
    }

    fn visit_str<E: Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(IdString(v.into()))
    }

    fn visit_string<E: Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(IdString(v.into_boxed_str()))
    }
}

/// Declares a string-backed id newtype which deserializes from either a string or an integer.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(::serde::Deserialize, ::serde::Serialize, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
        #[serde(from = "crate::id::IdString", into = "crate::id::IdString")]
        pub struct $name(Box<str>);

        impl $name {
            #[inline]
            pub fn new<S>(id: S) -> Self
            where
                S: Into<Box<str>>,
            {
                Self(id.into())
            }

            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<crate::id::IdString> for $name {
            fn from(crate::id::IdString(id): crate::id::IdString) -> Self {
                Self(id)
            }
        }

        impl From<$name> for crate::id::IdString {
            fn from($name(id): $name) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.into())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id.into_boxed_str())
            }
        }

        impl From<&$name> for $name {
            fn from(id: &$name) -> Self {
                id.clone()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

pub(crate) use string_id;

#[cfg(test)]
mod tests {
    use super::IdString;

    #[test]
    fn test_id_from_string_or_number() {
        let id: IdString = serde_json::from_str(r#""17841400008460056""#).unwrap();
        assert_eq!(&*id.0, "17841400008460056");

        let id: IdString = serde_json::from_str("17841400008460056").unwrap();
        assert_eq!(&*id.0, "17841400008460056");

        assert!(serde_json::from_str::<IdString>("1.5").is_err());
        assert!(serde_json::from_str::<IdString>("true").is_err());
    }

    #[test]
    fn test_negative_ids_rejected() {
        assert!(serde_json::from_str::<IdString>("-42").is_err());
        assert!(serde_json::from_str::<IdString>("-42.0").is_err());
        assert!(serde_json::from_str::<IdString>("-170141183460469231731687303715884105728").is_err());

        let id: IdString = serde_json::from_str("42.0").unwrap();
        assert_eq!(&*id.0, "42");
    }
}

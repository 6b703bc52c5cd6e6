use serde::Deserialize;

use crate::id::string_id;

string_id! {
    /// The id of a Threads user. The special id `me` refers to the user who owns the access token
    /// being used; see [`UserId::me`].
    UserId
}

impl UserId {
    /// The `me` alias, which the API resolves to the user who owns the access token.
    #[inline]
    pub fn me() -> Self {
        Self::new("me")
    }

    #[inline]
    pub fn is_me(&self) -> bool {
        self.as_str() == "me"
    }
}

/// A Threads user profile. Only the fields requested with
/// [`ProfileField`](crate::request_options::ProfileField)s are populated; `id` is always returned.
#[derive(Deserialize, Clone, Default, Debug)]
pub struct UserProfile {
    pub id: Option<UserId>,
    pub username: Option<Box<str>>,
    pub threads_profile_picture_url: Option<Box<str>>,
    pub threads_biography: Option<Box<str>>,
}

impl UserProfile {
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn profile_picture_url(&self) -> Option<&str> {
        self.threads_profile_picture_url.as_deref()
    }

    pub fn biography(&self) -> Option<&str> {
        self.threads_biography.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::{UserId, UserProfile};

    #[test]
    fn test_deserialize_partial_profile() {
        let profile: UserProfile = serde_json::from_str(
            r#"{"id": "1234567", "username": "threadsapitestuser"}"#,
        )
        .unwrap();

        assert_eq!(profile.id, Some(UserId::new("1234567")));
        assert_eq!(profile.username(), Some("threadsapitestuser"));
        assert_eq!(profile.biography(), None);
        assert_eq!(profile.profile_picture_url(), None);
    }

    #[test]
    fn test_me_alias() {
        assert!(UserId::me().is_me());
        assert!(!UserId::new("1234567").is_me());
        assert_eq!(UserId::me().to_string(), "me");
    }
}

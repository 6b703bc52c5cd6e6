use chrono::{DateTime, ParseError, Utc};
use serde::{de::Error, Deserialize, Deserializer};

/// Parses a timestamp sent by the API. The API uses ISO 8601 with a colon-less UTC offset (e.g.
/// `2024-07-02T13:17:11+0000`), which is not valid RFC 3339, so fall back to that format if the
/// RFC 3339 parse fails.
pub(crate) fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, ParseError> {
    DateTime::parse_from_rfc3339(s)
        .or_else(|_| DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f%z"))
        .map(|dt| dt.with_timezone(&Utc))
}

pub(crate) fn deserialize_opt_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Box<str>>::deserialize(deserializer)?
        .map(|s| {
            parse_timestamp(&s)
                .map_err(|err| D::Error::custom(format!("invalid timestamp \"{}\": {}", s, err)))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::parse_timestamp;

    #[test]
    fn test_parse_timestamp() {
        let expected = Utc.with_ymd_and_hms(2024, 7, 2, 13, 17, 11).unwrap();

        assert_eq!(parse_timestamp("2024-07-02T13:17:11+0000").unwrap(), expected);
        assert_eq!(parse_timestamp("2024-07-02T13:17:11+00:00").unwrap(), expected);
        assert_eq!(parse_timestamp("2024-07-02T14:17:11+0100").unwrap(), expected);
        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn test_parse_timestamp_fractional_seconds() {
        let expected = Utc.with_ymd_and_hms(2024, 7, 1, 10, 0, 0).unwrap()
            + chrono::Duration::milliseconds(123);

        assert_eq!(parse_timestamp("2024-07-01T10:00:00.123+0000").unwrap(), expected);
        assert_eq!(parse_timestamp("2024-07-01T10:00:00.123+00:00").unwrap(), expected);
    }
}

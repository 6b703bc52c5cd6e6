use serde::Deserialize;

/// A user's current usage of their publishing quotas, as returned by the
/// `threads_publishing_limit` endpoint. Only the fields requested with
/// [`PublishingLimitField`](crate::request_options::PublishingLimitField)s are populated.
#[derive(Deserialize, Clone, Default, Debug)]
pub struct PublishingLimit {
    pub reply_quota_usage: Option<f64>,
    pub reply_config: Option<QuotaConfig>,
}

impl PublishingLimit {
    /// Returns the number of replies which can still be published within the current quota
    /// window, if both the usage and the quota total were returned.
    pub fn replies_remaining(&self) -> Option<f64> {
        let usage = self.reply_quota_usage?;
        let total = self.reply_config.as_ref()?.quota_total?;
        Some((total - usage).max(0.0))
    }
}

#[derive(Deserialize, Clone, Default, Debug)]
pub struct QuotaConfig {
    pub quota_total: Option<f64>,
    /// The length of the quota window, in seconds.
    pub quota_duration: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::PublishingLimit;

    #[test]
    fn test_replies_remaining() {
        let limit: PublishingLimit = serde_json::from_str(
            r#"{"reply_quota_usage": 12, "reply_config": {"quota_total": 1000, "quota_duration": 86400}}"#,
        )
        .unwrap();
        assert_eq!(limit.replies_remaining(), Some(988.0));

        let limit: PublishingLimit = serde_json::from_str(r#"{"reply_quota_usage": 12}"#).unwrap();
        assert_eq!(limit.replies_remaining(), None);
    }
}

use chrono::{DateTime, Utc};
use enumscribe::{EnumDeserialize, ScribeStaticStr};
use serde::Deserialize;

use crate::time::deserialize_opt_timestamp;

/// A metric which can be requested for a single media object.
#[derive(ScribeStaticStr, EnumDeserialize, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum MediaMetric {
    #[enumscribe(str = "views")]
    Views,
    #[enumscribe(str = "likes")]
    Likes,
    #[enumscribe(str = "replies")]
    Replies,
    #[enumscribe(str = "reposts")]
    Reposts,
    #[enumscribe(str = "quotes")]
    Quotes,
}

/// A metric which can be requested for a user's whole account.
#[derive(ScribeStaticStr, EnumDeserialize, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum AccountMetric {
    #[enumscribe(str = "views")]
    Views,
    #[enumscribe(str = "likes")]
    Likes,
    #[enumscribe(str = "replies")]
    Replies,
    #[enumscribe(str = "reposts")]
    Reposts,
    #[enumscribe(str = "quotes")]
    Quotes,
    #[enumscribe(str = "followers_count")]
    FollowersCount,
    #[enumscribe(str = "follower_demographics")]
    FollowerDemographics,
}

/// A time series for a single metric.
#[derive(Deserialize, Clone, Debug)]
pub struct MetricValue<M> {
    pub name: M,
    pub period: Box<str>,
    pub values: Box<[MetricPoint]>,
    pub title: Box<str>,
    pub description: Box<str>,
    pub id: Box<str>,
}

impl<M> MetricValue<M> {
    /// The sum of every value in the series.
    pub fn total(&self) -> f64 {
        self.values.iter().map(|point| point.value).sum()
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct MetricPoint {
    pub value: f64,
    #[serde(default, deserialize_with = "deserialize_opt_timestamp")]
    pub end_time: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::{AccountMetric, MediaMetric, MetricValue};

    #[test]
    fn test_deserialize_account_metric() {
        let metric: MetricValue<AccountMetric> = serde_json::from_str(
            r#"{
                "name": "views",
                "period": "day",
                "values": [
                    {"value": 10, "end_time": "2024-07-01T07:00:00+0000"},
                    {"value": 32, "end_time": "2024-07-02T07:00:00+0000"}
                ],
                "title": "views",
                "description": "The number of times your profile was viewed.",
                "id": "1234567/insights/views/day"
            }"#,
        )
        .unwrap();

        assert_eq!(metric.name, AccountMetric::Views);
        assert_eq!(metric.values.len(), 2);
        assert_eq!(metric.total(), 42.0);
        assert!(metric.values.iter().all(|point| point.end_time.is_some()));
    }

    #[test]
    fn test_media_metrics_reject_account_only_names() {
        let res = serde_json::from_str::<MetricValue<MediaMetric>>(
            r#"{
                "name": "followers_count",
                "period": "lifetime",
                "values": [{"value": 1}],
                "title": "followers_count",
                "description": "",
                "id": "x"
            }"#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn test_missing_required_field() {
        let res = serde_json::from_str::<MetricValue<MediaMetric>>(
            r#"{"name": "likes", "period": "lifetime", "values": []}"#,
        );
        assert!(res.is_err());
    }
}

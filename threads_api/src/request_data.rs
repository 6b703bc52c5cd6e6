use std::{borrow::Cow, fmt};

use enumscribe::ScribeStaticStr;
use reqwest::{header::{HeaderValue, CONTENT_TYPE}, RequestBuilder};
use url::form_urlencoded;

use crate::request_options::{Pagination, TimeRange};

pub type Param<'a> = (&'static str, Cow<'a, str>);

/// An ordered list of request parameters. Whether they are sent in the query string or the body
/// is decided by the [`RequestData`] they are wrapped in.
#[derive(Clone, Default, Debug)]
pub struct Params<'a> {
    params: Vec<Param<'a>>,
}

impl<'a> Params<'a> {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<V>(&mut self, key: &'static str, val: V)
    where
        V: Into<Cow<'a, str>>,
    {
        self.params.push((key, val.into()));
    }

    pub fn push_opt<V>(&mut self, key: &'static str, val: Option<V>)
    where
        V: Into<Cow<'a, str>>,
    {
        if let Some(val) = val {
            self.push(key, val);
        }
    }

    pub fn push_display<T>(&mut self, key: &'static str, val: Option<T>)
    where
        T: fmt::Display,
    {
        if let Some(val) = val {
            self.push(key, val.to_string());
        }
    }

    /// Pushes `"true"` if the flag is set, and nothing otherwise.
    pub fn push_flag(&mut self, key: &'static str, flag: bool) {
        if flag {
            self.push(key, "true");
        }
    }

    pub fn push_bool(&mut self, key: &'static str, val: Option<bool>) {
        if let Some(val) = val {
            self.push(key, if val { "true" } else { "false" });
        }
    }

    pub fn push_scribed<T>(&mut self, key: &'static str, val: Option<T>)
    where
        T: ScribeStaticStr,
    {
        if let Some(val) = val {
            self.push(key, val.scribe());
        }
    }

    /// Pushes the items joined with commas, or nothing if there are no items.
    pub fn push_comma_separated<T>(&mut self, key: &'static str, items: &[T])
    where
        T: ScribeStaticStr,
    {
        if !items.is_empty() {
            self.push(key, join_comma_separated(items.iter().map(|item| item.scribe())));
        }
    }

    pub fn push_time_range(&mut self, range: &TimeRange) {
        self.push_display("since", range.since.map(|since| since.timestamp()));
        self.push_display("until", range.until.map(|until| until.timestamp()));
    }

    pub fn push_pagination(&mut self, pagination: Option<&'a Pagination>) {
        match pagination {
            Some(Pagination::Cursor(cursor)) => {
                self.push_opt("before", cursor.before.as_deref());
                self.push_opt("after", cursor.after.as_deref());
                self.push_display("limit", cursor.limit);
            }
            Some(Pagination::Temporal(temporal)) => {
                self.push_time_range(&temporal.range);
                self.push_display("limit", temporal.limit);
            }
            None => (),
        }
    }

    /// Returns the value of the first parameter with the given key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_ref())
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.params.iter().map(|(k, _)| *k)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

pub trait RequestData {
    fn params(&self) -> &Params<'_>;
    fn build_http_request(self, builder: RequestBuilder) -> reqwest::Result<reqwest::Request>;
}

/// Parameters sent in the URL query string.
pub struct QueryData<'a> {
    params: Params<'a>,
}

impl<'a> QueryData<'a> {
    pub fn new(params: Params<'a>) -> Self {
        Self { params }
    }
}

impl<'a> RequestData for QueryData<'a> {
    fn params(&self) -> &Params<'_> {
        &self.params
    }

    fn build_http_request(self, builder: RequestBuilder) -> reqwest::Result<reqwest::Request> {
        builder.query(&self.params.params).build()
    }
}

/// Parameters sent as an `application/x-www-form-urlencoded` body. Parameters with empty values
/// are left out of the body entirely.
pub struct FormData<'a> {
    params: Params<'a>,
}

impl<'a> FormData<'a> {
    pub fn new(params: Params<'a>) -> Self {
        Self { params }
    }

    pub(crate) fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, val) in &self.params.params {
            if !val.is_empty() {
                serializer.append_pair(key, val);
            }
        }
        serializer.finish()
    }
}

impl<'a> RequestData for FormData<'a> {
    fn params(&self) -> &Params<'_> {
        &self.params
    }

    fn build_http_request(self, builder: RequestBuilder) -> reqwest::Result<reqwest::Request> {
        let body = self.encode();

        builder
            .header(
                CONTENT_TYPE,
                HeaderValue::from_static("application/x-www-form-urlencoded"),
            )
            .body(body)
            .build()
    }
}

pub(crate) fn join_comma_separated<'a, I>(items: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut buf = String::new();
    for item in items {
        if !buf.is_empty() {
            buf.push(',');
        }
        buf.push_str(item);
    }
    buf
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{FormData, Params};
    use crate::request_options::{
        CursorPagination, MediaField, Pagination, TemporalPagination,
    };

    #[test]
    fn test_comma_separated_fields() {
        let mut params = Params::new();
        params.push_comma_separated("fields", &[MediaField::Id, MediaField::Text, MediaField::Timestamp]);
        params.push_comma_separated::<MediaField>("empty", &[]);
        assert_eq!(params.get("fields"), Some("id,text,timestamp"));
        assert_eq!(params.get("empty"), None);
    }

    #[test]
    fn test_cursor_pagination() {
        let pagination = Pagination::from(CursorPagination::new().after("QVFIUk").limit(25));
        let mut params = Params::new();
        params.push_pagination(Some(&pagination));

        assert_eq!(params.get("after"), Some("QVFIUk"));
        assert_eq!(params.get("limit"), Some("25"));
        assert_eq!(params.get("before"), None);
        assert_eq!(params.get("since"), None);
    }

    #[test]
    fn test_temporal_pagination() {
        let since = Utc.with_ymd_and_hms(2024, 4, 13, 0, 0, 0).unwrap();
        let pagination = Pagination::from(TemporalPagination::new().since(since));
        let mut params = Params::new();
        params.push_pagination(Some(&pagination));

        assert_eq!(params.get("since"), Some("1712966400"));
        assert_eq!(params.get("until"), None);
        assert_eq!(params.get("after"), None);
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_form_encoding_skips_empty_values() {
        let mut params = Params::new();
        params.push("text", "robo 🤖 & friends");
        params.push("reply_to_id", "");
        params.push_flag("is_carousel_item", false);
        params.push("hide", "false");

        assert_eq!(
            FormData::new(params).encode(),
            "text=robo+%F0%9F%A4%96+%26+friends&hide=false"
        );
    }
}

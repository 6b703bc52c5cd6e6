use std::borrow::Cow;

use serde::de::DeserializeOwned;

use crate::{
    client::Method,
    insights::{AccountMetric, MediaMetric, MetricValue},
    limit::PublishingLimit,
    media::{MediaId, MediaObject},
    reply::Reply,
    request_data::Params,
    request_options::{
        MediaField, Pagination, ProfileField, PublishingLimitField, ReplyField, TimeRange,
    },
    response::{DataList, Page},
    user::{UserId, UserProfile},
};

/// A request to an authenticated API endpoint, sent with
/// [`AsyncClient::execute`](crate::AsyncClient::execute).
pub trait Endpoint {
    type Response: DeserializeOwned;

    const METHOD: Method;

    /// The endpoint's path below the API version, e.g. `me/threads`.
    fn path(&self) -> Cow<'_, str>;

    /// The endpoint's parameters, not including the access token.
    fn params(&self) -> Params<'_>;
}

/// Lists the threads published by a user.
#[derive(Clone, Debug)]
pub struct UserThreads {
    id: UserId,
    fields: Vec<MediaField>,
    pagination: Option<Pagination>,
}

impl UserThreads {
    #[inline]
    #[must_use]
    pub fn new<U: Into<UserId>>(id: U) -> Self {
        Self {
            id: id.into(),
            fields: Vec::new(),
            pagination: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn fields<I>(self, fields: I) -> Self
    where
        I: IntoIterator<Item = MediaField>,
    {
        Self {
            fields: fields.into_iter().collect(),
            ..self
        }
    }

    /// Selects a page of results. Setting cursor pagination replaces any time-based pagination,
    /// and vice versa.
    #[inline]
    #[must_use]
    pub fn pagination<P: Into<Pagination>>(self, pagination: P) -> Self {
        Self {
            pagination: Some(pagination.into()),
            ..self
        }
    }
}

impl Endpoint for UserThreads {
    type Response = Page<MediaObject>;

    const METHOD: Method = Method::Get;

    fn path(&self) -> Cow<'_, str> {
        Cow::Owned(format!("{}/threads", self.id))
    }

    fn params(&self) -> Params<'_> {
        let mut params = Params::new();
        params.push_comma_separated("fields", &self.fields);
        params.push_pagination(self.pagination.as_ref());
        params
    }
}

/// Looks up a single media object by id.
#[derive(Clone, Debug)]
pub struct MediaLookup {
    id: MediaId,
    fields: Vec<MediaField>,
}

impl MediaLookup {
    #[inline]
    #[must_use]
    pub fn new<M: Into<MediaId>>(id: M) -> Self {
        Self {
            id: id.into(),
            fields: Vec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn fields<I>(self, fields: I) -> Self
    where
        I: IntoIterator<Item = MediaField>,
    {
        Self {
            fields: fields.into_iter().collect(),
            ..self
        }
    }
}

impl Endpoint for MediaLookup {
    type Response = MediaObject;

    const METHOD: Method = Method::Get;

    fn path(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.id.as_str())
    }

    fn params(&self) -> Params<'_> {
        let mut params = Params::new();
        params.push_comma_separated("fields", &self.fields);
        params
    }
}

/// Looks up a user's profile.
#[derive(Clone, Debug)]
pub struct ProfileLookup {
    id: UserId,
    fields: Vec<ProfileField>,
}

impl ProfileLookup {
    #[inline]
    #[must_use]
    pub fn new<U: Into<UserId>>(id: U) -> Self {
        Self {
            id: id.into(),
            fields: Vec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn fields<I>(self, fields: I) -> Self
    where
        I: IntoIterator<Item = ProfileField>,
    {
        Self {
            fields: fields.into_iter().collect(),
            ..self
        }
    }
}

impl Endpoint for ProfileLookup {
    type Response = UserProfile;

    const METHOD: Method = Method::Get;

    fn path(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.id.as_str())
    }

    fn params(&self) -> Params<'_> {
        let mut params = Params::new();
        params.push_comma_separated("fields", &self.fields);
        params
    }
}

/// Looks up how much of their publishing quota a user has used.
#[derive(Clone, Debug)]
pub struct PublishingLimitLookup {
    id: UserId,
    fields: Vec<PublishingLimitField>,
}

impl PublishingLimitLookup {
    #[inline]
    #[must_use]
    pub fn new<U: Into<UserId>>(id: U) -> Self {
        Self {
            id: id.into(),
            fields: Vec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn fields<I>(self, fields: I) -> Self
    where
        I: IntoIterator<Item = PublishingLimitField>,
    {
        Self {
            fields: fields.into_iter().collect(),
            ..self
        }
    }
}

impl Endpoint for PublishingLimitLookup {
    type Response = DataList<PublishingLimit>;

    const METHOD: Method = Method::Get;

    fn path(&self) -> Cow<'_, str> {
        Cow::Owned(format!("{}/threads_publishing_limit", self.id))
    }

    fn params(&self) -> Params<'_> {
        let mut params = Params::new();
        params.push_comma_separated("fields", &self.fields);
        params
    }
}

/// Lists the top-level replies to a post.
#[derive(Clone, Debug)]
pub struct Replies {
    id: MediaId,
    fields: Vec<ReplyField>,
    reverse: Option<bool>,
    pagination: Option<Pagination>,
}

impl Replies {
    #[inline]
    #[must_use]
    pub fn new<M: Into<MediaId>>(id: M) -> Self {
        Self {
            id: id.into(),
            fields: Vec::new(),
            reverse: None,
            pagination: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn fields<I>(self, fields: I) -> Self
    where
        I: IntoIterator<Item = ReplyField>,
    {
        Self {
            fields: fields.into_iter().collect(),
            ..self
        }
    }

    /// Whether to return the replies in reverse chronological order.
    #[inline]
    #[must_use]
    pub fn reverse(self, reverse: bool) -> Self {
        Self {
            reverse: Some(reverse),
            ..self
        }
    }

    #[inline]
    #[must_use]
    pub fn pagination<P: Into<Pagination>>(self, pagination: P) -> Self {
        Self {
            pagination: Some(pagination.into()),
            ..self
        }
    }
}

impl Endpoint for Replies {
    type Response = Page<Reply>;

    const METHOD: Method = Method::Get;

    fn path(&self) -> Cow<'_, str> {
        Cow::Owned(format!("{}/replies", self.id))
    }

    fn params(&self) -> Params<'_> {
        let mut params = Params::new();
        params.push_comma_separated("fields", &self.fields);
        params.push_bool("reverse", self.reverse);
        params.push_pagination(self.pagination.as_ref());
        params
    }
}

/// Lists every reply in the tree below a post, flattened.
#[derive(Clone, Debug)]
pub struct Conversation {
    id: MediaId,
    fields: Vec<ReplyField>,
    reverse: Option<bool>,
    pagination: Option<Pagination>,
}

impl Conversation {
    #[inline]
    #[must_use]
    pub fn new<M: Into<MediaId>>(id: M) -> Self {
        Self {
            id: id.into(),
            fields: Vec::new(),
            reverse: None,
            pagination: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn fields<I>(self, fields: I) -> Self
    where
        I: IntoIterator<Item = ReplyField>,
    {
        Self {
            fields: fields.into_iter().collect(),
            ..self
        }
    }

    #[inline]
    #[must_use]
    pub fn reverse(self, reverse: bool) -> Self {
        Self {
            reverse: Some(reverse),
            ..self
        }
    }

    #[inline]
    #[must_use]
    pub fn pagination<P: Into<Pagination>>(self, pagination: P) -> Self {
        Self {
            pagination: Some(pagination.into()),
            ..self
        }
    }
}

impl Endpoint for Conversation {
    type Response = Page<Reply>;

    const METHOD: Method = Method::Get;

    fn path(&self) -> Cow<'_, str> {
        Cow::Owned(format!("{}/conversation", self.id))
    }

    fn params(&self) -> Params<'_> {
        let mut params = Params::new();
        params.push_comma_separated("fields", &self.fields);
        params.push_bool("reverse", self.reverse);
        params.push_pagination(self.pagination.as_ref());
        params
    }
}

/// Fetches metrics for a single media object.
#[derive(Clone, Debug)]
pub struct MediaInsights {
    id: MediaId,
    metrics: Vec<MediaMetric>,
    range: TimeRange,
}

impl MediaInsights {
    #[inline]
    #[must_use]
    pub fn new<M: Into<MediaId>>(id: M) -> Self {
        Self {
            id: id.into(),
            metrics: Vec::new(),
            range: TimeRange::default(),
        }
    }

    #[inline]
    #[must_use]
    pub fn metrics<I>(self, metrics: I) -> Self
    where
        I: IntoIterator<Item = MediaMetric>,
    {
        Self {
            metrics: metrics.into_iter().collect(),
            ..self
        }
    }

    #[inline]
    #[must_use]
    pub fn range(self, range: TimeRange) -> Self {
        Self { range, ..self }
    }
}

impl Endpoint for MediaInsights {
    type Response = DataList<MetricValue<MediaMetric>>;

    const METHOD: Method = Method::Get;

    fn path(&self) -> Cow<'_, str> {
        Cow::Owned(format!("{}/insights", self.id))
    }

    fn params(&self) -> Params<'_> {
        let mut params = Params::new();
        params.push_comma_separated("metric", &self.metrics);
        params.push_time_range(&self.range);
        params
    }
}

/// Fetches metrics for a user's whole account.
#[derive(Clone, Debug)]
pub struct AccountInsights {
    id: UserId,
    metrics: Vec<AccountMetric>,
    range: TimeRange,
}

impl AccountInsights {
    #[inline]
    #[must_use]
    pub fn new<U: Into<UserId>>(id: U) -> Self {
        Self {
            id: id.into(),
            metrics: Vec::new(),
            range: TimeRange::default(),
        }
    }

    #[inline]
    #[must_use]
    pub fn metrics<I>(self, metrics: I) -> Self
    where
        I: IntoIterator<Item = AccountMetric>,
    {
        Self {
            metrics: metrics.into_iter().collect(),
            ..self
        }
    }

    #[inline]
    #[must_use]
    pub fn range(self, range: TimeRange) -> Self {
        Self { range, ..self }
    }
}

impl Endpoint for AccountInsights {
    type Response = DataList<MetricValue<AccountMetric>>;

    const METHOD: Method = Method::Get;

    fn path(&self) -> Cow<'_, str> {
        Cow::Owned(format!("{}/threads_insights", self.id))
    }

    fn params(&self) -> Params<'_> {
        let mut params = Params::new();
        params.push_comma_separated("metric", &self.metrics);
        params.push_time_range(&self.range);
        params
    }
}

use chrono::{DateTime, Utc};
use enumscribe::ScribeStaticStr;

/// A permission which can be requested from a user during authorization.
#[derive(ScribeStaticStr, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Scope {
    #[enumscribe(str = "threads_basic")]
    Basic,
    #[enumscribe(str = "threads_content_publish")]
    ContentPublish,
    #[enumscribe(str = "threads_manage_insights")]
    ManageInsights,
    #[enumscribe(str = "threads_manage_replies")]
    ManageReplies,
    #[enumscribe(str = "threads_read_replies")]
    ReadReplies,
}

#[derive(ScribeStaticStr, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum MediaField {
    #[enumscribe(str = "id")]
    Id,
    #[enumscribe(str = "media_product_type")]
    MediaProductType,
    #[enumscribe(str = "media_type")]
    MediaType,
    #[enumscribe(str = "media_url")]
    MediaUrl,
    #[enumscribe(str = "permalink")]
    Permalink,
    #[enumscribe(str = "owner")]
    Owner,
    #[enumscribe(str = "username")]
    Username,
    #[enumscribe(str = "text")]
    Text,
    #[enumscribe(str = "timestamp")]
    Timestamp,
    #[enumscribe(str = "shortcode")]
    Shortcode,
    #[enumscribe(str = "thumbnail_url")]
    ThumbnailUrl,
    #[enumscribe(str = "children")]
    Children,
    #[enumscribe(str = "is_quote_post")]
    IsQuotePost,
    #[enumscribe(str = "is_reply")]
    IsReply,
    #[enumscribe(str = "status_code")]
    StatusCode,
}

#[derive(ScribeStaticStr, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ReplyField {
    #[enumscribe(str = "id")]
    Id,
    #[enumscribe(str = "text")]
    Text,
    #[enumscribe(str = "username")]
    Username,
    #[enumscribe(str = "permalink")]
    Permalink,
    #[enumscribe(str = "timestamp")]
    Timestamp,
    #[enumscribe(str = "media_product_type")]
    MediaProductType,
    #[enumscribe(str = "media_type")]
    MediaType,
    #[enumscribe(str = "media_url")]
    MediaUrl,
    #[enumscribe(str = "shortcode")]
    Shortcode,
    #[enumscribe(str = "thumbnail_url")]
    ThumbnailUrl,
    #[enumscribe(str = "children")]
    Children,
    #[enumscribe(str = "is_quote_post")]
    IsQuotePost,
    #[enumscribe(str = "has_replies")]
    HasReplies,
    #[enumscribe(str = "root_post")]
    RootPost,
    #[enumscribe(str = "replied_to")]
    RepliedTo,
    #[enumscribe(str = "is_reply")]
    IsReply,
    #[enumscribe(str = "is_reply_owned_by_me")]
    IsReplyOwnedByMe,
    #[enumscribe(str = "hide_status")]
    HideStatus,
}

#[derive(ScribeStaticStr, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ProfileField {
    #[enumscribe(str = "id")]
    Id,
    #[enumscribe(str = "username")]
    Username,
    #[enumscribe(str = "threads_profile_picture_url")]
    ProfilePictureUrl,
    #[enumscribe(str = "threads_biography")]
    Biography,
}

#[derive(ScribeStaticStr, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum PublishingLimitField {
    #[enumscribe(str = "reply_quota_usage")]
    ReplyQuotaUsage,
    #[enumscribe(str = "reply_config")]
    ReplyConfig,
}

/// How to select a page of results from a list endpoint. Cursor-based and time-based pagination
/// cannot be combined, so a request holds at most one of these.
#[derive(Clone, Debug)]
pub enum Pagination {
    Cursor(CursorPagination),
    Temporal(TemporalPagination),
}

impl From<CursorPagination> for Pagination {
    fn from(cursor: CursorPagination) -> Self {
        Self::Cursor(cursor)
    }
}

impl From<TemporalPagination> for Pagination {
    fn from(temporal: TemporalPagination) -> Self {
        Self::Temporal(temporal)
    }
}

/// Selects results relative to the opaque cursors returned in a previous page's `paging` object.
#[derive(Clone, Default, Debug)]
pub struct CursorPagination {
    pub(crate) before: Option<Box<str>>,
    pub(crate) after: Option<Box<str>>,
    pub(crate) limit: Option<u32>,
}

impl CursorPagination {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn before<S: Into<Box<str>>>(self, cursor: S) -> Self {
        Self {
            before: Some(cursor.into()),
            ..self
        }
    }

    #[inline]
    #[must_use]
    pub fn after<S: Into<Box<str>>>(self, cursor: S) -> Self {
        Self {
            after: Some(cursor.into()),
            ..self
        }
    }

    #[inline]
    #[must_use]
    pub fn limit(self, limit: u32) -> Self {
        Self {
            limit: Some(limit),
            ..self
        }
    }
}

/// Selects results published within a time range.
#[derive(Clone, Default, Debug)]
pub struct TemporalPagination {
    pub(crate) range: TimeRange,
    pub(crate) limit: Option<u32>,
}

impl TemporalPagination {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn since(self, since: DateTime<Utc>) -> Self {
        Self {
            range: self.range.since(since),
            ..self
        }
    }

    #[inline]
    #[must_use]
    pub fn until(self, until: DateTime<Utc>) -> Self {
        Self {
            range: self.range.until(until),
            ..self
        }
    }

    #[inline]
    #[must_use]
    pub fn limit(self, limit: u32) -> Self {
        Self {
            limit: Some(limit),
            ..self
        }
    }
}

/// An optionally-bounded time range, sent to the API as Unix timestamps.
#[derive(Clone, Copy, Default, Debug)]
pub struct TimeRange {
    pub(crate) since: Option<DateTime<Utc>>,
    pub(crate) until: Option<DateTime<Utc>>,
}

impl TimeRange {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn since(self, since: DateTime<Utc>) -> Self {
        Self {
            since: Some(since),
            ..self
        }
    }

    #[inline]
    #[must_use]
    pub fn until(self, until: DateTime<Utc>) -> Self {
        Self {
            until: Some(until),
            ..self
        }
    }
}

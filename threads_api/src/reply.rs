use chrono::{DateTime, Utc};
use enumscribe::EnumDeserialize;
use serde::Deserialize;

use crate::{
    media::{MediaId, MediaType},
    time::deserialize_opt_timestamp,
};

/// Whether a reply has been hidden, either by the owner of the root post or by moderation.
#[derive(EnumDeserialize, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum HideStatus {
    #[enumscribe(str = "NOT_HUSHED")]
    NotHushed,
    #[enumscribe(str = "UNHUSHED")]
    Unhushed,
    #[enumscribe(str = "HIDDEN")]
    Hidden,
    #[enumscribe(str = "COVERED")]
    Covered,
    #[enumscribe(str = "BLOCKED")]
    Blocked,
    #[enumscribe(str = "RESTRICTED")]
    Restricted,
}

impl HideStatus {
    pub fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }
}

/// A reply to a Threads post, as returned by the replies and conversation endpoints.
#[derive(Deserialize, Clone, Default, Debug)]
pub struct Reply {
    pub id: Option<MediaId>,
    pub text: Option<Box<str>>,
    pub username: Option<Box<str>>,
    pub permalink: Option<Box<str>>,
    #[serde(default, deserialize_with = "deserialize_opt_timestamp")]
    pub timestamp: Option<DateTime<Utc>>,
    pub media_product_type: Option<Box<str>>,
    pub media_type: Option<MediaType>,
    pub media_url: Option<Box<str>>,
    pub shortcode: Option<Box<str>>,
    pub thumbnail_url: Option<Box<str>>,
    pub children: Option<Box<[MediaId]>>,
    pub is_quote_post: Option<bool>,
    pub has_replies: Option<bool>,
    /// The top-level post of the thread this reply belongs to.
    pub root_post: Option<MediaId>,
    /// The post or reply this reply responds to directly.
    pub replied_to: Option<MediaId>,
    pub is_reply: Option<bool>,
    pub is_reply_owned_by_me: Option<bool>,
    pub hide_status: Option<HideStatus>,
}

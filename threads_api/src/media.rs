use chrono::{DateTime, Utc};
use enumscribe::{EnumDeserialize, ScribeStaticStr};
use serde::Deserialize;

use crate::{id::string_id, time::deserialize_opt_timestamp};

string_id! {
    /// The id of a Threads media object: a published post, a reply, or an unpublished media
    /// container.
    MediaId
}

/// The type of a published media object.
#[derive(EnumDeserialize, ScribeStaticStr, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum MediaType {
    #[enumscribe(str = "TEXT_POST")]
    TextPost,
    #[enumscribe(str = "IMAGE")]
    Image,
    #[enumscribe(str = "VIDEO")]
    Video,
    #[enumscribe(str = "CAROUSEL_ALBUM")]
    CarouselAlbum,
    #[enumscribe(str = "AUDIO")]
    Audio,
    #[enumscribe(str = "REPOST_FACADE")]
    RepostFacade,
}

/// The type of media container to create. This is distinct from [`MediaType`]; a `Text`
/// container becomes a `TEXT_POST` once published, and a `Carousel` container becomes a
/// `CAROUSEL_ALBUM`.
#[derive(ScribeStaticStr, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ContainerType {
    #[enumscribe(str = "TEXT")]
    Text,
    #[enumscribe(str = "IMAGE")]
    Image,
    #[enumscribe(str = "VIDEO")]
    Video,
    #[enumscribe(str = "CAROUSEL")]
    Carousel,
}

/// Who is allowed to reply to a post.
#[derive(ScribeStaticStr, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ReplyControl {
    #[enumscribe(str = "everyone")]
    Everyone,
    #[enumscribe(str = "accounts_you_follow")]
    AccountsYouFollow,
    #[enumscribe(str = "mentioned_only")]
    MentionedOnly,
}

/// A Threads media object. Only the fields requested with
/// [`MediaField`](crate::request_options::MediaField)s are populated.
#[derive(Deserialize, Clone, Default, Debug)]
pub struct MediaObject {
    pub id: Option<MediaId>,
    pub media_product_type: Option<Box<str>>,
    pub media_type: Option<MediaType>,
    pub media_url: Option<Box<str>>,
    pub permalink: Option<Box<str>>,
    pub owner: Option<Box<str>>,
    pub username: Option<Box<str>>,
    pub text: Option<Box<str>>,
    #[serde(default, deserialize_with = "deserialize_opt_timestamp")]
    pub timestamp: Option<DateTime<Utc>>,
    pub shortcode: Option<Box<str>>,
    pub thumbnail_url: Option<Box<str>>,
    pub children: Option<Box<[MediaId]>>,
    pub is_quote_post: Option<bool>,
    pub is_reply: Option<bool>,
    pub status_code: Option<Box<str>>,
}

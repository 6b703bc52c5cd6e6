use std::borrow::Cow;

use enumscribe::ScribeStaticStr;

use crate::{
    client::Method,
    media::{ContainerType, MediaId, ReplyControl},
    request::Endpoint,
    request_data::{join_comma_separated, Params},
    response::{Created, Success},
};

/// The content of a media container. Each variant carries what its container type requires.
#[derive(Clone, Debug)]
pub enum MediaContent {
    Text {
        text: Box<str>,
    },
    Image {
        image_url: Box<str>,
        text: Option<Box<str>>,
        is_carousel_item: bool,
    },
    Video {
        video_url: Box<str>,
        text: Option<Box<str>>,
        is_carousel_item: bool,
    },
    Carousel {
        children: Vec<MediaId>,
        text: Option<Box<str>>,
    },
}

impl MediaContent {
    pub fn container_type(&self) -> ContainerType {
        match self {
            MediaContent::Text { .. } => ContainerType::Text,
            MediaContent::Image { .. } => ContainerType::Image,
            MediaContent::Video { .. } => ContainerType::Video,
            MediaContent::Carousel { .. } => ContainerType::Carousel,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            MediaContent::Text { text } => Some(text),
            MediaContent::Image { text, .. }
            | MediaContent::Video { text, .. }
            | MediaContent::Carousel { text, .. } => text.as_deref(),
        }
    }
}

/// Creates an unpublished media container. A container only appears on the user's profile once
/// it has been published with [`AsyncClient::publish`](crate::AsyncClient::publish).
///
/// Images and videos meant for a carousel are created with [`carousel_item`](Self::carousel_item)
/// set, and their ids are then passed to [`CreateMediaContainer::carousel`].
#[derive(Clone, Debug)]
pub struct CreateMediaContainer {
    content: MediaContent,
    reply_to_id: Option<MediaId>,
    reply_control: Option<ReplyControl>,
}

impl CreateMediaContainer {
    #[inline]
    #[must_use]
    pub fn new(content: MediaContent) -> Self {
        Self {
            content,
            reply_to_id: None,
            reply_control: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn text<S: Into<Box<str>>>(text: S) -> Self {
        Self::new(MediaContent::Text { text: text.into() })
    }

    #[inline]
    #[must_use]
    pub fn image<S: Into<Box<str>>>(image_url: S) -> Self {
        Self::new(MediaContent::Image {
            image_url: image_url.into(),
            text: None,
            is_carousel_item: false,
        })
    }

    #[inline]
    #[must_use]
    pub fn video<S: Into<Box<str>>>(video_url: S) -> Self {
        Self::new(MediaContent::Video {
            video_url: video_url.into(),
            text: None,
            is_carousel_item: false,
        })
    }

    #[inline]
    #[must_use]
    pub fn carousel<I>(children: I) -> Self
    where
        I: IntoIterator<Item = MediaId>,
    {
        Self::new(MediaContent::Carousel {
            children: children.into_iter().collect(),
            text: None,
        })
    }

    /// Sets the caption of an image, video or carousel. For a text post, replaces its text.
    #[must_use]
    pub fn with_text<S: Into<Box<str>>>(self, caption: S) -> Self {
        let caption = caption.into();
        let content = match self.content {
            MediaContent::Text { .. } => MediaContent::Text { text: caption },
            MediaContent::Image {
                image_url,
                is_carousel_item,
                ..
            } => MediaContent::Image {
                image_url,
                text: Some(caption),
                is_carousel_item,
            },
            MediaContent::Video {
                video_url,
                is_carousel_item,
                ..
            } => MediaContent::Video {
                video_url,
                text: Some(caption),
                is_carousel_item,
            },
            MediaContent::Carousel { children, .. } => MediaContent::Carousel {
                children,
                text: Some(caption),
            },
        };
        Self { content, ..self }
    }

    /// Marks an image or video as an item of a carousel. Has no effect on text posts or
    /// carousels.
    #[must_use]
    pub fn carousel_item(self, carousel_item: bool) -> Self {
        let content = match self.content {
            MediaContent::Image {
                image_url, text, ..
            } => MediaContent::Image {
                image_url,
                text,
                is_carousel_item: carousel_item,
            },
            MediaContent::Video {
                video_url, text, ..
            } => MediaContent::Video {
                video_url,
                text,
                is_carousel_item: carousel_item,
            },
            content => content,
        };
        Self { content, ..self }
    }

    /// Makes the post a reply to another post.
    #[inline]
    #[must_use]
    pub fn reply_to<M: Into<MediaId>>(self, reply_to_id: M) -> Self {
        Self {
            reply_to_id: Some(reply_to_id.into()),
            ..self
        }
    }

    #[inline]
    #[must_use]
    pub fn reply_control(self, reply_control: ReplyControl) -> Self {
        Self {
            reply_control: Some(reply_control),
            ..self
        }
    }

    pub fn content(&self) -> &MediaContent {
        &self.content
    }
}

impl Endpoint for CreateMediaContainer {
    type Response = Created;

    const METHOD: Method = Method::Post;

    fn path(&self) -> Cow<'_, str> {
        Cow::Borrowed("me/threads")
    }

    fn params(&self) -> Params<'_> {
        let mut params = Params::new();
        params.push("media_type", self.content.container_type().scribe());
        params.push_opt("text", self.content.text());
        params.push_scribed("reply_control", self.reply_control);
        params.push_opt("reply_to_id", self.reply_to_id.as_ref().map(MediaId::as_str));

        match &self.content {
            MediaContent::Text { .. } => (),
            MediaContent::Image {
                image_url,
                is_carousel_item,
                ..
            } => {
                params.push("image_url", &**image_url);
                params.push_flag("is_carousel_item", *is_carousel_item);
            }
            MediaContent::Video {
                video_url,
                is_carousel_item,
                ..
            } => {
                params.push("video_url", &**video_url);
                params.push_flag("is_carousel_item", *is_carousel_item);
            }
            MediaContent::Carousel { children, .. } => {
                params.push(
                    "children",
                    join_comma_separated(children.iter().map(MediaId::as_str)),
                );
            }
        }

        params
    }
}

/// Publishes a media container.
#[derive(Clone, Debug)]
pub struct Publish {
    creation_id: MediaId,
}

impl Publish {
    #[inline]
    #[must_use]
    pub fn new<M: Into<MediaId>>(creation_id: M) -> Self {
        Self {
            creation_id: creation_id.into(),
        }
    }
}

impl Endpoint for Publish {
    type Response = Created;

    const METHOD: Method = Method::Post;

    fn path(&self) -> Cow<'_, str> {
        Cow::Borrowed("me/threads_publish")
    }

    fn params(&self) -> Params<'_> {
        let mut params = Params::new();
        params.push("creation_id", self.creation_id.as_str());
        params
    }
}

/// Hides or unhides a reply.
#[derive(Clone, Debug)]
pub struct ManageReply {
    reply_id: MediaId,
    hide: bool,
}

impl ManageReply {
    #[inline]
    #[must_use]
    pub fn new<M: Into<MediaId>>(reply_id: M, hide: bool) -> Self {
        Self {
            reply_id: reply_id.into(),
            hide,
        }
    }
}

impl Endpoint for ManageReply {
    type Response = Success;

    const METHOD: Method = Method::Post;

    fn path(&self) -> Cow<'_, str> {
        Cow::Owned(format!("{}/manage_reply", self.reply_id))
    }

    fn params(&self) -> Params<'_> {
        let mut params = Params::new();
        // Always sent, otherwise there would be no way to unhide a reply.
        params.push_bool("hide", Some(self.hide));
        params
    }
}

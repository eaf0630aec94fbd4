//! Post entity - immutable content published in a channel

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::entities::User;
use crate::value_objects::Snowflake;

/// Kind of media attached to a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaType {
    Image,
    Video,
}

impl MediaType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Image => "IMAGE",
            Self::Video => "VIDEO",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IMAGE" => Ok(Self::Image),
            "VIDEO" => Ok(Self::Video),
            other => Err(format!("unknown media type: {other}")),
        }
    }
}

/// Post entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    pub created_by_id: Snowflake,
    pub content: String,
    pub media_type: Option<MediaType>,
    pub media_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Post {
    pub fn new(
        id: Snowflake,
        channel_id: Snowflake,
        created_by_id: Snowflake,
        content: String,
    ) -> Self {
        Self {
            id,
            channel_id,
            created_by_id,
            content,
            media_type: None,
            media_url: None,
            created_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn with_media(mut self, media_type: MediaType, media_url: String) -> Self {
        self.media_type = Some(media_type);
        self.media_url = Some(media_url);
        self
    }

    #[inline]
    pub fn has_media(&self) -> bool {
        self.media_url.is_some()
    }
}

/// A post joined with its author, as listed to clients
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostWithAuthor {
    pub post: Post,
    pub author: User,
}

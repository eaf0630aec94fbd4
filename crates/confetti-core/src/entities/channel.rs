//! Channel entity - a named community space owning posts and memberships

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Channel entity
///
/// `username` is the channel's unique handle; `name` is its display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub id: Snowflake,
    pub name: String,
    pub username: String,
    pub image: Option<String>,
    pub created_by_id: Snowflake,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Channel {
    #[must_use]
    pub fn new(
        id: Snowflake,
        name: String,
        username: String,
        image: Option<String>,
        created_by_id: Snowflake,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            username,
            image,
            created_by_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update. Returns `true` if any field was overwritten.
    pub fn apply(&mut self, patch: ChannelPatch) -> bool {
        if patch.is_empty() {
            return false;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(username) = patch.username {
            self.username = username;
        }
        if let Some(image) = patch.image {
            self.image = Some(image);
        }
        self.updated_at = Utc::now();
        true
    }
}

/// Partial channel update: present fields overwrite, absent fields stay unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelPatch {
    pub name: Option<String>,
    pub image: Option<String>,
    pub username: Option<String>,
}

impl ChannelPatch {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.image.is_none() && self.username.is_none()
    }
}

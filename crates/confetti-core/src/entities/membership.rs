//! Membership entity - a user's seat in a channel, carrying a role

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::entities::User;
use crate::value_objects::{Capabilities, Snowflake};

/// Member role, ordered ADMIN > MODERATOR > GUEST
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberRole {
    Admin,
    Moderator,
    #[default]
    Guest,
}

impl MemberRole {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Moderator => "MODERATOR",
            Self::Guest => "GUEST",
        }
    }

    /// Capabilities granted by this role
    #[must_use]
    pub fn capabilities(self) -> Capabilities {
        match self {
            Self::Admin => Capabilities::ALL,
            Self::Moderator => Capabilities::STAFF,
            Self::Guest => Capabilities::MEMBER,
        }
    }

    /// Sort rank for member listings (admins first)
    #[must_use]
    pub fn rank(self) -> u8 {
        match self {
            Self::Admin => 0,
            Self::Moderator => 1,
            Self::Guest => 2,
        }
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MemberRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Self::Admin),
            "MODERATOR" => Ok(Self::Moderator),
            "GUEST" => Ok(Self::Guest),
            other => Err(format!("unknown member role: {other}")),
        }
    }
}

/// Membership entity (junction between User and Channel)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Membership {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub channel_id: Snowflake,
    pub role: MemberRole,
    pub joined_at: DateTime<Utc>,
}

impl Membership {
    pub fn new(id: Snowflake, user_id: Snowflake, channel_id: Snowflake, role: MemberRole) -> Self {
        Self {
            id,
            user_id,
            channel_id,
            role,
            joined_at: Utc::now(),
        }
    }

    /// The founder's seat, created together with the channel
    pub fn founder(id: Snowflake, user_id: Snowflake, channel_id: Snowflake) -> Self {
        Self::new(id, user_id, channel_id, MemberRole::Admin)
    }

    /// A seat taken by joining an existing channel
    pub fn guest(id: Snowflake, user_id: Snowflake, channel_id: Snowflake) -> Self {
        Self::new(id, user_id, channel_id, MemberRole::Guest)
    }

    #[inline]
    pub fn capabilities(&self) -> Capabilities {
        self.role.capabilities()
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role == MemberRole::Admin
    }
}

/// A membership joined with the member's user record, as listed to clients
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberWithUser {
    pub membership: Membership,
    pub user: User,
}

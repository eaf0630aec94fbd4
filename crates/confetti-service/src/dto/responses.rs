//! Response DTOs for API endpoints
//!
//! Response DTOs are both `Serialize` and `Deserialize`: collection responses are
//! stored in the cache as JSON, and the client crate decodes the same shapes.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use confetti_core::{MediaType, MemberRole, Snowflake};
use serde::{Deserialize, Serialize};

// ============================================================================
// Common Response Types
// ============================================================================

/// A bare confirmation message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// User fields embedded in member and post listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: Snowflake,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

// ============================================================================
// Channel Responses
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelResponse {
    pub id: Snowflake,
    pub name: String,
    pub username: String,
    #[serde(default)]
    pub image: Option<String>,
    pub created_by_id: Snowflake,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A channel with its member count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelWithCountResponse {
    #[serde(flatten)]
    pub channel: ChannelResponse,
    pub member_count: i64,
}

/// `POST /channels` → 201
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateChannelResponse {
    pub channel: ChannelResponse,
    pub message: String,
}

/// `PATCH /channels` → 200
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateChannelResponse {
    pub data: ChannelResponse,
    pub message: String,
}

/// `GET /channels` → 200
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelsResponse {
    pub channels: Vec<ChannelResponse>,
}

/// `GET /channels/:id` → 200
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelDetailResponse {
    pub channel: ChannelWithCountResponse,
}

// ============================================================================
// Membership Responses
// ============================================================================

/// A membership as returned by a join
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipResponse {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub channel_id: Snowflake,
    pub role: MemberRole,
    pub joined_at: DateTime<Utc>,
}

/// A membership with its user, as listed by `GET /members`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    #[serde(flatten)]
    pub membership: MembershipResponse,
    pub user: UserSummary,
}

/// `GET /members` → 200
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembersResponse {
    pub members: Vec<MemberResponse>,
    pub cached: bool,
}

/// `POST /members` → 201
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinChannelResponse {
    pub member: MembershipResponse,
}

/// `GET /channels/:id/membership` → 200
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipStatusResponse {
    pub is_member: bool,
    #[serde(default)]
    pub role: Option<MemberRole>,
}

// ============================================================================
// Post Responses
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    pub created_by_id: Snowflake,
    pub content: String,
    #[serde(default)]
    pub media_type: Option<MediaType>,
    #[serde(default)]
    pub media_url: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Present in listings; absent on a freshly created post
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<UserSummary>,
}

/// `GET /posts` → 200
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostsResponse {
    pub posts: Vec<PostResponse>,
    pub cached: bool,
}

/// `POST /posts` → 201
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostResponse {
    pub new_post: PostResponse,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub checks: HealthChecks,
}

/// Individual dependency probes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthChecks {
    pub database: bool,
    pub redis: bool,
}

impl ReadinessResponse {
    pub fn ready(database: bool, redis: bool) -> Self {
        let status = if database && redis { "ready" } else { "not_ready" };
        Self {
            status: status.to_string(),
            checks: HealthChecks { database, redis },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.checks.database && self.checks.redis
    }
}

//! Membership database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for memberships table
#[derive(Debug, Clone, FromRow)]
pub struct MembershipModel {
    pub id: i64,
    pub user_id: i64,
    pub channel_id: i64,
    pub role: String,
    pub joined_at: DateTime<Utc>,
}

/// Membership row joined with its user
#[derive(Debug, Clone, FromRow)]
pub struct MemberWithUserModel {
    pub id: i64,
    pub user_id: i64,
    pub channel_id: i64,
    pub role: String,
    pub joined_at: DateTime<Utc>,
    pub username: String,
    pub user_image: Option<String>,
    pub user_created_at: DateTime<Utc>,
}

//! Post database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Post row joined with its author
#[derive(Debug, Clone, FromRow)]
pub struct PostWithAuthorModel {
    pub id: i64,
    pub channel_id: i64,
    pub created_by_id: i64,
    pub content: String,
    pub media_type: Option<String>,
    pub media_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub author_username: String,
    pub author_image: Option<String>,
    pub author_created_at: DateTime<Utc>,
}

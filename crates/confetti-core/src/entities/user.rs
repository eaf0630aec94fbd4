//! User entity - an account provisioned by the external auth provider

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// A user as seen by Confetti: referenced by channels, memberships and posts, never
/// mutated here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub username: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(id: Snowflake, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            image: None,
            created_at: Utc::now(),
        }
    }
}

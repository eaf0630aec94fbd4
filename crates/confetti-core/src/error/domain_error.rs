//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Channel not found: {0}")]
    ChannelNotFound(Snowflake),

    #[error("Membership not found")]
    MembershipNotFound,

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Forbidden, you are not part of this channel")]
    NotChannelMember,

    #[error("Only ADMINS can delete.")]
    RequiresAdmin,

    #[error("Only ADMINS or MODERATORS can update.")]
    RequiresAdminOrModerator,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Username already exists")]
    ChannelUsernameTaken,

    #[error("Already a member of this channel")]
    AlreadyMember,

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("The last ADMIN cannot leave the channel (delete it instead)")]
    LastAdmin,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::ChannelNotFound(_) => "UNKNOWN_CHANNEL",
            Self::MembershipNotFound => "UNKNOWN_MEMBERSHIP",

            // Authorization
            Self::NotChannelMember => "NOT_CHANNEL_MEMBER",
            Self::RequiresAdmin => "REQUIRES_ADMIN",
            Self::RequiresAdminOrModerator => "REQUIRES_ADMIN_OR_MODERATOR",

            // Conflict
            Self::ChannelUsernameTaken => "USERNAME_TAKEN",
            Self::AlreadyMember => "ALREADY_MEMBER",

            // Business Rules
            Self::LastAdmin => "LAST_ADMIN",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ChannelNotFound(_) | Self::MembershipNotFound)
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::NotChannelMember | Self::RequiresAdmin | Self::RequiresAdminOrModerator
        )
    }

    /// Check if this is a conflict error (including business rules that reject the
    /// current state of the resource)
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::ChannelUsernameTaken | Self::AlreadyMember | Self::LastAdmin
        )
    }
}

//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::{Channel, MemberWithUser, Membership, Post, PostWithAuthor, User};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;
}

// ============================================================================
// Channel Repository
// ============================================================================

#[async_trait]
pub trait ChannelRepository: Send + Sync {
    /// Find channel by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Channel>>;

    /// List the channels a user holds a membership in, most recently joined first
    async fn find_by_member(&self, user_id: Snowflake) -> RepoResult<Vec<Channel>>;

    /// Create a channel and its founder's membership atomically.
    ///
    /// Returns `ChannelUsernameTaken` if the handle is already in use; in that case
    /// neither row is written.
    async fn create_with_founder(&self, channel: &Channel, founder: &Membership)
        -> RepoResult<()>;

    /// Persist changed fields of an existing channel
    async fn update(&self, channel: &Channel) -> RepoResult<()>;

    /// Delete a channel; memberships and posts go with it
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Number of memberships in a channel
    async fn member_count(&self, channel_id: Snowflake) -> RepoResult<i64>;
}

// ============================================================================
// Membership Repository
// ============================================================================

#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// Find a user's membership in a channel
    async fn find(&self, channel_id: Snowflake, user_id: Snowflake)
        -> RepoResult<Option<Membership>>;

    /// List a channel's members with their user records, admins first
    async fn find_by_channel(&self, channel_id: Snowflake) -> RepoResult<Vec<MemberWithUser>>;

    /// Create a membership. Returns `AlreadyMember` on a duplicate (user, channel) pair.
    async fn create(&self, membership: &Membership) -> RepoResult<()>;

    /// Delete a user's membership unless it is the channel's last ADMIN seat.
    ///
    /// The admin count and the delete happen as one atomic step, so two admins leaving
    /// at once can never strand the channel. Returns the removed record, or
    /// `MembershipNotFound` / `LastAdmin` with nothing deleted.
    async fn delete_unless_last_admin(
        &self,
        channel_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Membership>;
}

// ============================================================================
// Post Repository
// ============================================================================

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Create a new post
    async fn create(&self, post: &Post) -> RepoResult<()>;

    /// List a channel's posts with their authors, newest first
    async fn find_by_channel(&self, channel_id: Snowflake) -> RepoResult<Vec<PostWithAuthor>>;
}

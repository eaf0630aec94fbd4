//! # confetti-core
//!
//! Domain layer containing entities, role capabilities, authorization rules, and the
//! ports (repository, cache, rate limiter, session) the outer layers implement.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod policy;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Channel, ChannelPatch, MediaType, MemberRole, MemberWithUser, Membership, Post,
    PostWithAuthor, User,
};
pub use error::DomainError;
pub use policy::{authorize, ensure_can_leave, ChannelAction};
pub use traits::{
    ChannelRepository, CollectionCache, MembershipRepository, PostRepository, RateLimitDecision,
    RateLimiter, RepoResult, SessionResolver, UserRepository,
};
pub use value_objects::{Capabilities, Snowflake, SnowflakeGenerator, SnowflakeParseError};

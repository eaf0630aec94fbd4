//! Business logic services
//!
//! Each service borrows the [`ServiceContext`] and composes authorization rules,
//! persistence and cache invalidation for one resource.

pub mod cache;
pub mod channel;
pub mod context;
pub mod error;
pub mod membership;
pub mod post;
pub mod session;

pub use cache::{invalidate, read_through, CacheRead};
pub use channel::ChannelService;
pub use context::{ServiceContext, ServiceContextBuilder, DEFAULT_CACHE_TTL};
pub use error::{ServiceError, ServiceResult};
pub use membership::MembershipService;
pub use post::PostService;
pub use session::JwtSessionResolver;

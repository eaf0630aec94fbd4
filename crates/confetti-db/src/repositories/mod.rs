//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in confetti-core.

mod channel;
mod error;
mod membership;
mod post;
mod user;

pub use channel::PgChannelRepository;
pub use membership::PgMembershipRepository;
pub use post::PgPostRepository;
pub use user::PgUserRepository;

//! Ports - interfaces the domain needs and the infrastructure provides

mod ports;
mod repositories;

pub use ports::{CollectionCache, RateLimitDecision, RateLimiter, SessionResolver};
pub use repositories::{
    ChannelRepository, MembershipRepository, PostRepository, RepoResult, UserRepository,
};

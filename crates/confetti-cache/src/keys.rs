//! Cache key construction
//!
//! Every key that touches Redis is built here so that readers and invalidators agree.

use confetti_core::Snowflake;

/// Prefix for channel member lists
pub const MEMBERS_PREFIX: &str = "members:";
/// Prefix for channel post lists
pub const POSTS_PREFIX: &str = "posts:";
/// Prefix for rate-limit counters
pub const RATE_LIMIT_PREFIX: &str = "ratelimit:";

#[inline]
pub fn members_key(channel_id: Snowflake) -> String {
    format!("{MEMBERS_PREFIX}{channel_id}")
}

#[inline]
pub fn posts_key(channel_id: Snowflake) -> String {
    format!("{POSTS_PREFIX}{channel_id}")
}

/// Counter key for one (bucket, caller) pair
#[inline]
pub fn rate_limit_key(bucket: &str, caller: &str) -> String {
    format!("{RATE_LIMIT_PREFIX}{bucket}:{caller}")
}

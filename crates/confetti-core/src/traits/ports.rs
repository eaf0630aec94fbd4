//! Non-persistence ports: rate limiting, collection cache, session resolution

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::entities::User;
use crate::traits::RepoResult;

// ============================================================================
// Rate Limiter
// ============================================================================

/// Outcome of one rate-limit check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub limit: u32,
    pub remaining: u32,
    /// Unix timestamp (milliseconds) at which the current window resets
    pub reset_at: i64,
}

impl RateLimitDecision {
    /// Decision for a request admitted as the `count`-th hit of its window
    pub fn from_count(count: u64, limit: u32, reset_at: i64) -> Self {
        let used = u32::try_from(count).unwrap_or(u32::MAX);
        Self {
            allowed: used <= limit,
            limit,
            remaining: limit.saturating_sub(used),
            reset_at,
        }
    }
}

/// Fixed-window counter keyed by an opaque string (bucket name + caller identifier)
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Count one hit against `key` and report whether it is within `limit` per `window`
    async fn check(&self, key: &str, limit: u32, window: Duration)
        -> RepoResult<RateLimitDecision>;
}

// ============================================================================
// Collection Cache
// ============================================================================

/// String key-value store fronting collection reads
#[async_trait]
pub trait CollectionCache: Send + Sync {
    async fn get(&self, key: &str) -> RepoResult<Option<String>>;

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> RepoResult<()>;

    async fn del(&self, key: &str) -> RepoResult<()>;
}

// ============================================================================
// Session Resolver
// ============================================================================

/// Resolves the caller's identity from a bearer credential
#[async_trait]
pub trait SessionResolver: Send + Sync {
    /// `Ok(None)` for a missing, malformed, expired or unknown-user credential.
    /// `Err` is reserved for infrastructure failures.
    async fn resolve(&self, credential: &str) -> RepoResult<Option<User>>;
}

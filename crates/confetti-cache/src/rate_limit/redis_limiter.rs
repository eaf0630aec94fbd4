//! Redis-backed fixed-window rate limiter

use async_trait::async_trait;
use chrono::Utc;
use std::time::Duration;
use tracing::{debug, instrument};

use confetti_core::traits::{RateLimitDecision, RateLimiter, RepoResult};

use super::fixed_window;
use crate::pool::RedisPool;

/// Counts hits with `INCR` on a per-window key that expires shortly after the window ends
#[derive(Debug, Clone)]
pub struct RedisRateLimiter {
    pool: RedisPool,
}

impl RedisRateLimiter {
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RateLimiter for RedisRateLimiter {
    #[instrument(skip(self))]
    async fn check(
        &self,
        key: &str,
        limit: u32,
        window: Duration,
    ) -> RepoResult<RateLimitDecision> {
        let (index, reset_at) = fixed_window(Utc::now().timestamp_millis(), window);
        let window_key = format!("{key}:{index}");

        // Keep the counter a little past the window so late readers still see it
        let count = self
            .pool
            .incr_with_expiry(&window_key, window + Duration::from_secs(1))
            .await?;

        let decision = RateLimitDecision::from_count(count, limit, reset_at);
        debug!(count, allowed = decision.allowed, "Rate limit counted");
        Ok(decision)
    }
}

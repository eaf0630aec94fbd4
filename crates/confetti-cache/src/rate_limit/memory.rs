//! In-process fixed-window rate limiter

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use confetti_core::traits::{RateLimitDecision, RateLimiter, RepoResult};

use super::fixed_window;

#[derive(Debug, Clone, Copy)]
struct Window {
    index: i64,
    reset_at: i64,
    count: u64,
}

/// Stale windows are swept once every this many checks
const SWEEP_EVERY: u64 = 1024;

/// Per-key counters held in a `DashMap`; each key tracks only its current window
#[derive(Debug, Default)]
pub struct InMemoryRateLimiter {
    windows: DashMap<String, Window>,
    checks: AtomicU64,
}

impl InMemoryRateLimiter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one hit at an explicit instant (milliseconds since the Unix epoch)
    pub fn check_at(
        &self,
        key: &str,
        limit: u32,
        window: Duration,
        now_ms: i64,
    ) -> RateLimitDecision {
        let (index, reset_at) = fixed_window(now_ms, window);

        let decision = {
            let mut entry = self.windows.entry(key.to_string()).or_insert(Window {
                index,
                reset_at,
                count: 0,
            });
            if entry.index != index {
                *entry = Window {
                    index,
                    reset_at,
                    count: 0,
                };
            }
            entry.count += 1;
            RateLimitDecision::from_count(entry.count, limit, entry.reset_at)
        };

        // The entry guard is released above; retain locks every shard
        if (self.checks.fetch_add(1, Ordering::Relaxed) + 1) % SWEEP_EVERY == 0 {
            self.sweep(now_ms);
        }

        decision
    }

    /// Remove counters whose window has already reset
    fn sweep(&self, now_ms: i64) {
        self.windows.retain(|_, w| w.reset_at > now_ms);
    }
}

#[async_trait]
impl RateLimiter for InMemoryRateLimiter {
    async fn check(
        &self,
        key: &str,
        limit: u32,
        window: Duration,
    ) -> RepoResult<RateLimitDecision> {
        Ok(self.check_at(key, limit, window, Utc::now().timestamp_millis()))
    }
}

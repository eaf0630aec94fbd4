//! Fixed-window rate limiters
//!
//! Windows are aligned to multiples of the window length since the Unix epoch, so
//! every backend (and every server instance sharing Redis) agrees on when a window
//! resets.

mod memory;
mod redis_limiter;

pub use memory::InMemoryRateLimiter;
pub use redis_limiter::RedisRateLimiter;

use std::time::Duration;

/// Window index and reset timestamp (ms) for the window containing `now_ms`
pub fn fixed_window(now_ms: i64, window: Duration) -> (i64, i64) {
    let window_ms = i64::try_from(window.as_millis()).unwrap_or(i64::MAX).max(1);
    let index = now_ms.div_euclid(window_ms);
    (index, (index + 1).saturating_mul(window_ms))
}

//! # confetti-cache
//!
//! Implementations of the `confetti-core` cache and rate-limit ports.
//!
//! - **Connection Pool**: managed Redis connections via deadpool
//! - **Collection Cache**: `members:<channelId>` / `posts:<channelId>` JSON blobs with TTL
//! - **Rate Limiter**: fixed-window counters keyed by bucket and caller
//! - **In-process backends**: `dashmap`-based equivalents for tests and single-node runs
//!
//! ```ignore
//! use confetti_cache::{RedisPool, RedisPoolConfig, RedisCollectionCache, RedisRateLimiter};
//!
//! let pool = RedisPool::new(RedisPoolConfig::default())?;
//! let cache = RedisCollectionCache::new(pool.clone());
//! let limiter = RedisRateLimiter::new(pool);
//! ```

pub mod collection;
pub mod keys;
pub mod pool;
pub mod rate_limit;

pub use collection::{InMemoryCollectionCache, RedisCollectionCache};
pub use keys::{members_key, posts_key, rate_limit_key};
pub use pool::{RedisPool, RedisPoolConfig, RedisPoolError, RedisResult, SharedRedisPool};
pub use rate_limit::{fixed_window, InMemoryRateLimiter, RedisRateLimiter};

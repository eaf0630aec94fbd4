//! Read-through access to the collection cache
//!
//! Reads return a [`CacheRead`] that says whether the value came from the cache.
//! The cache never fails a request: read errors and undecodable entries degrade to a
//! miss, write and invalidation errors are logged and dropped.

use std::future::Future;
use std::time::Duration;

use confetti_core::traits::CollectionCache;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::error::ServiceResult;

/// A value together with where it was served from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheRead<T> {
    pub value: T,
    /// `true` when served from the cache without touching persistence
    pub cached: bool,
}

impl<T> CacheRead<T> {
    pub fn hit(value: T) -> Self {
        Self { value, cached: true }
    }

    pub fn miss(value: T) -> Self {
        Self {
            value,
            cached: false,
        }
    }
}

/// Serve `key` from the cache, or run `load` and store its JSON for `ttl`.
pub async fn read_through<T, F, Fut>(
    cache: &dyn CollectionCache,
    key: &str,
    ttl: Duration,
    load: F,
) -> ServiceResult<CacheRead<T>>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = ServiceResult<T>>,
{
    match cache.get(key).await {
        Ok(Some(raw)) => match serde_json::from_str::<T>(&raw) {
            Ok(value) => {
                debug!(key, "Cache hit");
                return Ok(CacheRead::hit(value));
            }
            Err(e) => warn!(key, error = %e, "Discarding undecodable cache entry"),
        },
        Ok(None) => debug!(key, "Cache miss"),
        Err(e) => warn!(key, error = %e, "Cache read failed, falling back to persistence"),
    }

    let value = load().await?;

    match serde_json::to_string(&value) {
        Ok(raw) => {
            if let Err(e) = cache.set(key, &raw, ttl).await {
                warn!(key, error = %e, "Cache write failed");
            }
        }
        Err(e) => warn!(key, error = %e, "Failed to serialize value for cache"),
    }

    Ok(CacheRead::miss(value))
}

/// Drop `key` after a write. A failure leaves the entry to expire on its own.
pub async fn invalidate(cache: &dyn CollectionCache, key: &str) {
    match cache.del(key).await {
        Ok(()) => debug!(key, "Cache invalidated"),
        Err(e) => warn!(key, error = %e, "Cache invalidation failed"),
    }
}

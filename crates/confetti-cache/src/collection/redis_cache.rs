//! Redis-backed collection cache

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, instrument};

use confetti_core::traits::{CollectionCache, RepoResult};

use crate::pool::RedisPool;

/// Stores serialized collections as plain Redis strings with `SETEX`
#[derive(Debug, Clone)]
pub struct RedisCollectionCache {
    pool: RedisPool,
}

impl RedisCollectionCache {
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CollectionCache for RedisCollectionCache {
    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self.pool.get_raw(key).await?;
        debug!(hit = value.is_some(), "Collection cache lookup");
        Ok(value)
    }

    #[instrument(skip(self, value), fields(bytes = value.len()))]
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> RepoResult<()> {
        self.pool.set_ex(key, value, ttl).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn del(&self, key: &str) -> RepoResult<()> {
        let existed = self.pool.delete(key).await?;
        debug!(existed, "Collection cache invalidated");
        Ok(())
    }
}

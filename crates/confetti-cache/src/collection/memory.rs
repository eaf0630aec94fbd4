//! In-process collection cache
//!
//! Same contract as the Redis backend, scoped to one process. Used by tests and by
//! single-node deployments that run without Redis.

use async_trait::async_trait;
use dashmap::DashMap;
use std::time::{Duration, Instant};

use confetti_core::traits::{CollectionCache, RepoResult};

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Instant,
}

#[derive(Debug, Default)]
pub struct InMemoryCollectionCache {
    entries: DashMap<String, Entry>,
}

impl InMemoryCollectionCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a live (unexpired) entry exists for `key`
    pub fn contains(&self, key: &str) -> bool {
        self.entries
            .get(key)
            .is_some_and(|entry| entry.expires_at > Instant::now())
    }
}

#[async_trait]
impl CollectionCache for InMemoryCollectionCache {
    async fn get(&self, key: &str) -> RepoResult<Option<String>> {
        let now = Instant::now();
        let live = self
            .entries
            .get(key)
            .and_then(|entry| (entry.expires_at > now).then(|| entry.value.clone()));

        if live.is_none() {
            self.entries.remove_if(key, |_, entry| entry.expires_at <= now);
        }
        Ok(live)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> RepoResult<()> {
        self.entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    async fn del(&self, key: &str) -> RepoResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

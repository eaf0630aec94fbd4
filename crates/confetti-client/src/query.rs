//! Query cache
//!
//! Results are stored as JSON under a [`QueryKey`]. An entry is fresh for the stale time
//! after it was fetched, unless invalidated. Entries nobody has read for the GC time are
//! dropped by [`QueryCache::collect_garbage`].

use std::collections::HashMap;
use std::future::Future;
use std::time::{Duration, Instant};

use confetti_core::Snowflake;
use parking_lot::Mutex;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::ClientResult;

/// Entries younger than this are served without a request
pub const DEFAULT_STALE_TIME: Duration = Duration::from_secs(5 * 60);

/// Entries unread for this long are dropped
pub const DEFAULT_GC_TIME: Duration = Duration::from_secs(10 * 60);

/// Query identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// `["sidebarServers"]`: channels the caller belongs to
    SidebarServers,
    /// `["channel", id]`
    Channel(Snowflake),
    /// `["membership", id]`: the caller's own membership
    Membership(Snowflake),
    /// `["members", id]`
    Members(Snowflake),
    /// `["posts", id]`
    Posts(Snowflake),
}

impl QueryKey {
    /// Every key scoped to one channel
    #[must_use]
    pub fn channel_scoped(channel_id: Snowflake) -> [Self; 4] {
        [
            Self::Channel(channel_id),
            Self::Membership(channel_id),
            Self::Members(channel_id),
            Self::Posts(channel_id),
        ]
    }
}

#[derive(Debug)]
struct Entry {
    value: serde_json::Value,
    fetched_at: Instant,
    last_read: Instant,
    invalidated: bool,
}

impl Entry {
    fn is_fresh(&self, stale_time: Duration) -> bool {
        !self.invalidated && self.fetched_at.elapsed() < stale_time
    }
}

/// Client-side cache of query results
#[derive(Debug)]
pub struct QueryCache {
    entries: Mutex<HashMap<QueryKey, Entry>>,
    stale_time: Duration,
    gc_time: Duration,
}

impl QueryCache {
    #[must_use]
    pub fn new(stale_time: Duration, gc_time: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            stale_time,
            gc_time,
        }
    }

    /// Fresh value for `key`, if any
    pub fn get_fresh<T: DeserializeOwned>(&self, key: &QueryKey) -> Option<T> {
        let mut entries = self.entries.lock();
        let entry = entries.get_mut(key)?;
        if !entry.is_fresh(self.stale_time) {
            return None;
        }
        entry.last_read = Instant::now();
        serde_json::from_value(entry.value.clone()).ok()
    }

    /// Last known value for `key`, fresh or not
    pub fn peek<T: DeserializeOwned>(&self, key: &QueryKey) -> Option<T> {
        let mut entries = self.entries.lock();
        let entry = entries.get_mut(key)?;
        entry.last_read = Instant::now();
        serde_json::from_value(entry.value.clone()).ok()
    }

    pub fn insert<T: Serialize>(&self, key: QueryKey, value: &T) -> ClientResult<()> {
        let value = serde_json::to_value(value)?;
        let now = Instant::now();
        self.entries.lock().insert(
            key,
            Entry {
                value,
                fetched_at: now,
                last_read: now,
                invalidated: false,
            },
        );
        Ok(())
    }

    /// Mark `key` stale; the next read re-fetches
    pub fn invalidate(&self, key: &QueryKey) {
        if let Some(entry) = self.entries.lock().get_mut(key) {
            entry.invalidated = true;
        }
    }

    pub fn invalidate_all(&self, keys: &[QueryKey]) {
        let mut entries = self.entries.lock();
        for key in keys {
            if let Some(entry) = entries.get_mut(key) {
                entry.invalidated = true;
            }
        }
    }

    pub fn remove(&self, key: &QueryKey) {
        self.entries.lock().remove(key);
    }

    /// Drop entries unread for longer than the GC time. Returns how many were dropped.
    pub fn collect_garbage(&self) -> usize {
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|_, entry| entry.last_read.elapsed() < self.gc_time);
        before - entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Serve a fresh cached value or run `fetch` and store its result
    pub async fn fetch<T, F, Fut>(&self, key: QueryKey, fetch: F) -> ClientResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = ClientResult<T>>,
    {
        if let Some(value) = self.get_fresh(&key) {
            tracing::trace!(?key, "Query cache hit");
            return Ok(value);
        }

        let value = fetch().await?;
        self.insert(key, &value)?;
        Ok(value)
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(DEFAULT_STALE_TIME, DEFAULT_GC_TIME)
    }
}

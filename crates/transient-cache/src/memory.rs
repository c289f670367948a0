use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::future::Cache;
use moka::Expiry;
use serde_json::Value;
use tracing::debug;

use crate::error::Result;
use crate::store::CacheStore;

pub(crate) const DEFAULT_MAX_CAPACITY: u64 = 10_000;

#[derive(Debug, Clone)]
struct StoredValue {
    value: Arc<Value>,
    ttl: Option<Duration>,
}

/// Expiry policy that reads each entry's own TTL
struct PerEntryTtl;

impl Expiry<String, StoredValue> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &StoredValue,
        _created_at: Instant,
    ) -> Option<Duration> {
        value.ttl
    }

    // An overwrite restarts the clock with the new entry's TTL
    fn expire_after_update(
        &self,
        _key: &String,
        value: &StoredValue,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        value.ttl
    }
}

/// In-process store backed by a bounded moka cache
pub struct MemoryStore {
    cache: Cache<String, StoredValue>,
}

impl MemoryStore {
    /// Create a store holding up to 10,000 entries
    pub fn new() -> Self {
        Self::with_max_capacity(DEFAULT_MAX_CAPACITY)
    }

    /// Create a store holding up to `max_capacity` entries
    pub fn with_max_capacity(max_capacity: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(PerEntryTtl)
            .build();

        Self { cache }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let hit = self.cache.get(key).await;
        debug!(key, hit = hit.is_some(), "Memory store lookup");
        Ok(hit.map(|stored| stored.value.as_ref().clone()))
    }

    async fn set(&self, key: &str, value: Value, ttl_secs: u64) -> Result<()> {
        let stored = StoredValue {
            value: Arc::new(value),
            ttl: (ttl_secs > 0).then(|| Duration::from_secs(ttl_secs)),
        };
        self.cache.insert(key.to_string(), stored).await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        Ok(self.cache.remove(key).await.is_some())
    }
}

use std::path::PathBuf;

use crate::error::Result;
use crate::file::FileStore;
use crate::memory::{MemoryStore, DEFAULT_MAX_CAPACITY};
use crate::store::CacheStore;

/// Store selection for a [`Transient`](crate::Transient)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// When set, entries are persisted under this directory
    pub cache_dir: Option<PathBuf>,
    /// Entry bound for the in-memory store
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            cache_dir: None,
            max_capacity: DEFAULT_MAX_CAPACITY,
        }
    }
}

impl CacheConfig {
    /// Read `CACHE_DIR` and `CACHE_MAX_CAPACITY`
    pub fn from_env() -> Self {
        let cache_dir = std::env::var("CACHE_DIR")
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        let max_capacity = std::env::var("CACHE_MAX_CAPACITY")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_MAX_CAPACITY);

        Self {
            cache_dir,
            max_capacity,
        }
    }

    /// Build the configured store, creating the cache directory if needed
    pub async fn build_store(&self) -> Result<Box<dyn CacheStore>> {
        match &self.cache_dir {
            Some(dir) => {
                let store = FileStore::new(dir.clone());
                store.init().await?;
                Ok(Box::new(store))
            }
            None => Ok(Box::new(MemoryStore::with_max_capacity(self.max_capacity))),
        }
    }
}

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// Backing key/value storage for [`Transient`](crate::Transient)
///
/// `ttl_secs` is the number of seconds until the entry expires; 0 means the
/// entry never expires. Implementations must be safe for concurrent use.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Fetch a value, `None` when missing or expired
    async fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Insert or replace a value along with its expiry
    async fn set(&self, key: &str, value: Value, ttl_secs: u64) -> Result<()>;

    /// Remove a value, returns whether an entry was present
    async fn delete(&self, key: &str) -> Result<bool>;
}

#[async_trait]
impl<S: CacheStore + ?Sized> CacheStore for Box<S> {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: Value, ttl_secs: u64) -> Result<()> {
        (**self).set(key, value, ttl_secs).await
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        (**self).delete(key).await
    }
}

#[async_trait]
impl<S: CacheStore + ?Sized> CacheStore for Arc<S> {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: Value, ttl_secs: u64) -> Result<()> {
        (**self).set(key, value, ttl_secs).await
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        (**self).delete(key).await
    }
}

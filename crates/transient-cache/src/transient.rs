use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::error::Result;
use crate::memory::MemoryStore;
use crate::store::CacheStore;

/// TTL value meaning "keep until deleted"
pub const NO_EXPIRATION: u64 = 0;

/// Cache facade delegating to a [`CacheStore`]
///
/// Construct one at startup and share it by reference or `Arc`.
pub struct Transient<S = MemoryStore> {
    store: S,
}

impl Transient<MemoryStore> {
    /// Facade over a default in-memory store
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }
}

impl<S: CacheStore> Transient<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn get(&self, key: &str) -> Result<Option<Value>> {
        self.store.get(key).await
    }

    /// Store a value; `ttl_secs` of [`NO_EXPIRATION`] never expires
    pub async fn set(&self, key: &str, value: Value, ttl_secs: u64) -> Result<()> {
        self.store.set(key, value, ttl_secs).await
    }

    pub async fn delete(&self, key: &str) -> Result<bool> {
        self.store.delete(key).await
    }

    /// True when the key holds a truthy value (see [`is_truthy`])
    pub async fn exists(&self, key: &str) -> bool {
        match self.get(key).await {
            Ok(value) => value.as_ref().is_some_and(is_truthy),
            Err(e) => {
                warn!(key, error = %e, "Cache lookup failed, treating as absent");
                false
            }
        }
    }

    /// Fetch and deserialize a value
    pub async fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get(key).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Serialize and store a value
    pub async fn set_as<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
        ttl_secs: u64,
    ) -> Result<()> {
        let value = serde_json::to_value(value)?;
        self.set(key, value, ttl_secs).await
    }
}

/// Loose truthiness: `null`, `false`, zero, `""`, `"0"`, `[]` and `{}` are falsy
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !(s.is_empty() || s == "0"),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

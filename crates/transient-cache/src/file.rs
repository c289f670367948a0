//! File-backed store: one JSON record per key

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use tokio::fs;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::store::CacheStore;

#[derive(Debug, Serialize, Deserialize)]
struct StoredRecord {
    key: String,
    value: Value,
    expires_at: Option<DateTime<Utc>>,
}

impl StoredRecord {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// A store that persists entries as files under a directory
///
/// Records are written to a temporary file and renamed into place, so a
/// concurrent reader sees either the previous record or the new one.
pub struct FileStore {
    dir: PathBuf,
}

/// Process-wide sequence for temporary file names
static NEXT_TEMP: AtomicU64 = AtomicU64::new(0);

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Ensure the store directory exists
    pub async fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.dir).await?;
        info!(cache_dir = ?self.dir, "File store initialized");
        Ok(())
    }

    /// File name for a key: hex SHA-256, so any key maps to a safe path
    pub fn file_name(key: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(key.as_bytes());
        hex::encode(hasher.finalize())
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(Self::file_name(key))
    }

    /// Unique sibling path for an in-flight write of `key`
    fn temp_path_for(&self, key: &str) -> PathBuf {
        let n = NEXT_TEMP.fetch_add(1, Ordering::Relaxed);
        self.dir.join(format!(
            ".{}.{}.{}.tmp",
            Self::file_name(key),
            std::process::id(),
            n
        ))
    }

    async fn discard(&self, path: &Path) {
        if let Err(e) = fs::remove_file(path).await {
            if e.kind() != ErrorKind::NotFound {
                warn!(path = ?path, error = %e, "Failed to remove cache file");
            }
        }
    }
}

#[async_trait]
impl CacheStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let path = self.path_for(key);

        let raw = match fs::read(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(key, "File store miss");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let record: StoredRecord = match serde_json::from_slice(&raw) {
            Ok(record) => record,
            Err(e) => {
                warn!(key, error = %e, "Unreadable cache record, removing");
                self.discard(&path).await;
                return Ok(None);
            }
        };

        if record.is_expired(Utc::now()) {
            debug!(key, "File store entry expired");
            self.discard(&path).await;
            return Ok(None);
        }

        debug!(key, "File store hit");
        Ok(Some(record.value))
    }

    async fn set(&self, key: &str, value: Value, ttl_secs: u64) -> Result<()> {
        // TTLs too large to represent are treated as no expiry
        let expires_at = match ttl_secs {
            0 => None,
            secs => i64::try_from(secs)
                .ok()
                .and_then(Duration::try_seconds)
                .and_then(|ttl| Utc::now().checked_add_signed(ttl)),
        };
        let record = StoredRecord {
            key: key.to_string(),
            value,
            expires_at,
        };

        let data = serde_json::to_vec(&record)?;
        let temp = self.temp_path_for(key);
        fs::write(&temp, data).await?;
        if let Err(e) = fs::rename(&temp, self.path_for(key)).await {
            self.discard(&temp).await;
            return Err(e.into());
        }
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        match fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use tempfile::tempdir;

    async fn store_in(dir: &Path) -> FileStore {
        let store = FileStore::new(dir.join("transients"));
        store.init().await.unwrap();
        store
    }

    #[test]
    fn test_file_name_is_stable_hex() {
        let a = FileStore::file_name("plugin_settings");
        let b = FileStore::file_name("plugin_settings");
        let c = FileStore::file_name("plugin_settings_v2");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|ch| ch.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn test_set_get_delete() {
        let tmp = tempdir().unwrap();
        let store = store_in(tmp.path()).await;

        store.set("feed", json!({"items": [1, 2]}), 0).await.unwrap();
        assert_eq!(
            store.get("feed").await.unwrap(),
            Some(json!({"items": [1, 2]}))
        );

        assert!(store.delete("feed").await.unwrap());
        assert!(!store.delete("feed").await.unwrap());
        assert_eq!(store.get("feed").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_entries_survive_new_instance() {
        let tmp = tempdir().unwrap();
        store_in(tmp.path())
            .await
            .set("k", json!("persisted"), 0)
            .await
            .unwrap();

        let reopened = store_in(tmp.path()).await;
        assert_eq!(reopened.get("k").await.unwrap(), Some(json!("persisted")));
    }

    #[tokio::test]
    async fn test_expired_record_is_removed() {
        let tmp = tempdir().unwrap();
        let store = store_in(tmp.path()).await;

        let record = StoredRecord {
            key: "old".to_string(),
            value: json!(true),
            expires_at: Some(Utc::now() - Duration::seconds(5)),
        };
        let path = store.path_for("old");
        std::fs::write(&path, serde_json::to_vec(&record).unwrap()).unwrap();

        assert_eq!(store.get("old").await.unwrap(), None);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_corrupt_record_reads_as_absent() {
        let tmp = tempdir().unwrap();
        let store = store_in(tmp.path()).await;

        let path = store.path_for("broken");
        std::fs::write(&path, b"{ definitely not json").unwrap();

        assert_eq!(store.get("broken").await.unwrap(), None);
        assert!(!path.exists());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_reads_never_lose_a_write() {
        let tmp = tempdir().unwrap();
        let store = Arc::new(store_in(tmp.path()).await);
        let done = Arc::new(AtomicBool::new(false));

        let reader = {
            let store = Arc::clone(&store);
            let done = Arc::clone(&done);
            tokio::spawn(async move {
                while !done.load(Ordering::Relaxed) {
                    let _ = store.get("k").await;
                }
            })
        };

        let big = "x".repeat(500_000);
        for i in 0..100 {
            store.set("k", json!(format!("{i}{big}")), 0).await.unwrap();
            assert!(store.path_for("k").exists(), "entry lost after write {i}");
        }

        done.store(true, Ordering::Relaxed);
        reader.await.unwrap();

        let value = store.get("k").await.unwrap().unwrap();
        assert!(value.as_str().unwrap().starts_with("99x"));

        // No temporary files are left behind
        let leftovers = std::fs::read_dir(store.path_for("k").parent().unwrap())
            .unwrap()
            .filter(|entry| {
                entry
                    .as_ref()
                    .unwrap()
                    .file_name()
                    .to_string_lossy()
                    .ends_with(".tmp")
            })
            .count();
        assert_eq!(leftovers, 0);
    }

    #[tokio::test]
    async fn test_overwrite_clears_expiry() {
        let tmp = tempdir().unwrap();
        let store = store_in(tmp.path()).await;

        store.set("k", json!("first"), 60).await.unwrap();
        store.set("k", json!("second"), 0).await.unwrap();

        let raw = std::fs::read(store.path_for("k")).unwrap();
        let record: StoredRecord = serde_json::from_slice(&raw).unwrap();
        assert_eq!(record.expires_at, None);
        assert_eq!(store.get("k").await.unwrap(), Some(json!("second")));
    }

    #[tokio::test]
    async fn test_entry_expires_after_ttl() {
        let tmp = tempdir().unwrap();
        let store = store_in(tmp.path()).await;

        store.set("short", json!(1), 1).await.unwrap();
        assert_eq!(store.get("short").await.unwrap(), Some(json!(1)));

        tokio::time::sleep(std::time::Duration::from_millis(1200)).await;
        assert_eq!(store.get("short").await.unwrap(), None);
        assert!(!store.path_for("short").exists());
    }

    #[tokio::test]
    async fn test_ttl_sets_expiry_in_record() {
        let tmp = tempdir().unwrap();
        let store = store_in(tmp.path()).await;

        store.set("ttl", json!(1), 60).await.unwrap();
        let raw = std::fs::read(store.path_for("ttl")).unwrap();
        let record: StoredRecord = serde_json::from_slice(&raw).unwrap();

        assert_eq!(record.key, "ttl");
        let expires_at = record.expires_at.unwrap();
        assert!(expires_at > Utc::now() + Duration::seconds(50));
        assert!(!record.is_expired(Utc::now()));
    }
}

//! Database handle and typed JSON access.
//!
//! Provides a unified interface over a [`KvStore`] backend.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::warn;

use crate::error::{DbError, Result};
use crate::schema::ALL_KEYS;
use crate::store::{FileStore, KvStore, MemoryStore};

pub const DEFAULT_IO_TIMEOUT: Duration = Duration::from_secs(5);

/// Nominal quota used for usage reporting.
pub const STORAGE_QUOTA_BYTES: u64 = 5 * 1024 * 1024;

/// Bytes used across all known keys.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct StorageUsage {
    pub used: u64,
    pub available: u64,
    pub percentage: f64,
}

/// Main database handle.
///
/// Every read-modify-write goes through [`Database::update`], which holds a
/// single writer lock so concurrent tasks in one process cannot lose updates.
pub struct Database {
    backend: Arc<dyn KvStore>,
    write_lock: Mutex<()>,
    io_timeout: Duration,
}

impl Database {
    /// Open or create a file-backed database in `path`.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let store = FileStore::open(path).await?;
        Ok(Self::with_backend(Arc::new(store)))
    }

    /// A database that lives only as long as the process.
    pub fn in_memory() -> Self {
        Self::with_backend(Arc::new(MemoryStore::new()))
    }

    pub fn with_backend(backend: Arc<dyn KvStore>) -> Self {
        Self {
            backend,
            write_lock: Mutex::new(()),
            io_timeout: DEFAULT_IO_TIMEOUT,
        }
    }

    pub fn with_io_timeout(mut self, timeout: Duration) -> Self {
        self.io_timeout = timeout;
        self
    }

    async fn timed<T>(&self, key: &str, op: impl std::future::Future<Output = Result<T>>) -> Result<T> {
        tokio::time::timeout(self.io_timeout, op)
            .await
            .map_err(|_| DbError::Timeout {
                key: key.to_string(),
                millis: self.io_timeout.as_millis(),
            })?
    }

    pub async fn get_raw(&self, key: &str) -> Result<Option<String>> {
        self.timed(key, self.backend.get(key)).await
    }

    /// Read and parse the value under `key`.
    ///
    /// `Ok(None)` means the key is absent; a value that fails to parse is
    /// reported as [`DbError::Corrupt`].
    pub async fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get_raw(key).await? {
            None => Ok(None),
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|source| DbError::Corrupt { key: key.to_string(), source }),
        }
    }

    /// Like [`Database::read`], but an absent or corrupt value yields `T::default()`.
    /// Backend I/O failures still propagate.
    pub async fn read_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T> {
        match self.read(key).await {
            Ok(value) => Ok(value.unwrap_or_default()),
            Err(DbError::Corrupt { key, source }) => {
                warn!(key = %key, error = %source, "Stored value is corrupt, using default");
                Ok(T::default())
            }
            Err(e) => Err(e),
        }
    }

    async fn put<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.timed(key, self.backend.set(key, &raw)).await
    }

    /// Overwrite the value under `key`.
    pub async fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.put(key, value).await
    }

    /// Read-modify-write under the writer lock.
    ///
    /// If `f` returns an error nothing is written.
    pub async fn update<T, R, F>(&self, key: &str, f: F) -> Result<R>
    where
        T: DeserializeOwned + Serialize + Default + Send,
        F: FnOnce(&mut T) -> Result<R> + Send,
        R: Send,
    {
        let _guard = self.write_lock.lock().await;
        let mut value: T = self.read_or_default(key).await?;
        let out = f(&mut value)?;
        self.put(key, &value).await?;
        Ok(out)
    }

    pub async fn remove(&self, key: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.timed(key, self.backend.remove(key)).await
    }

    /// Write several values while holding the writer lock once.
    pub async fn write_many(&self, values: &[(&str, String)]) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        for (key, raw) in values {
            self.timed(key, self.backend.set(key, raw)).await?;
        }
        Ok(())
    }

    /// Bytes used across every known key against [`STORAGE_QUOTA_BYTES`].
    pub async fn usage(&self) -> Result<StorageUsage> {
        let mut used = 0u64;
        for key in ALL_KEYS {
            if let Some(raw) = self.get_raw(key).await? {
                used += raw.len() as u64;
            }
        }
        let percentage = (used as f64 / STORAGE_QUOTA_BYTES as f64 * 100.0).min(100.0);
        Ok(StorageUsage { used, available: STORAGE_QUOTA_BYTES, percentage })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[tokio::test]
    async fn test_read_distinguishes_missing_and_corrupt() {
        let db = Database::in_memory();
        assert!(db.read::<Vec<String>>("k").await.unwrap().is_none());

        db.write("k", "not a list").await.unwrap();
        assert!(matches!(db.read::<Vec<String>>("k").await, Err(DbError::Corrupt { .. })));
        assert!(db.read_or_default::<Vec<String>>("k").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_aborts_without_writing() {
        let db = Database::in_memory();
        db.write("k", &vec!["a".to_string()]).await.unwrap();
        let result: Result<()> = db
            .update("k", |v: &mut Vec<String>| {
                v.clear();
                Err(DbError::NotFound("x".into()))
            })
            .await;
        assert!(result.is_err());
        assert_eq!(db.read::<Vec<String>>("k").await.unwrap().unwrap(), vec!["a".to_string()]);
    }

    #[tokio::test]
    async fn test_concurrent_updates_are_not_lost() {
        let db = Arc::new(Database::in_memory());
        let mut handles = Vec::new();
        for i in 0..20 {
            let db = db.clone();
            handles.push(tokio::spawn(async move {
                db.update("k", |v: &mut Vec<u32>| {
                    v.push(i);
                    Ok(())
                })
                .await
            }));
        }
        for h in handles {
            h.await.unwrap().unwrap();
        }
        assert_eq!(db.read::<Vec<u32>>("k").await.unwrap().unwrap().len(), 20);
    }

    struct StalledStore;

    #[async_trait]
    impl KvStore for StalledStore {
        async fn get(&self, _key: &str) -> Result<Option<String>> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(None)
        }
        async fn set(&self, _key: &str, _value: &str) -> Result<()> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(())
        }
        async fn remove(&self, _key: &str) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_stalled_backend_times_out() {
        let db = Database::with_backend(Arc::new(StalledStore))
            .with_io_timeout(Duration::from_millis(20));
        assert!(matches!(db.get_raw("k").await, Err(DbError::Timeout { .. })));
        assert!(matches!(db.write("k", &1).await, Err(DbError::Timeout { .. })));
    }

    #[tokio::test]
    async fn test_usage_counts_known_keys() {
        let db = Database::in_memory();
        db.write(crate::schema::KEY_FAVORITES, &vec!["p1".to_string()]).await.unwrap();
        let usage = db.usage().await.unwrap();
        assert_eq!(usage.used, "[\"p1\"]".len() as u64);
        assert!(usage.percentage < 1.0);
    }
}

//! Whole-collection key-value storage capability.
//!
//! Every collection persists as a JSON blob under a string key. That substrate
//! is modeled as a small dyn-safe trait so the store logic can run against a
//! file on disk in production and an in-memory map in tests, and could be
//! pointed at a real database in a future migration.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

/// Errors from the storage substrate.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored data is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Get/set whole JSON collections by key.
///
/// Every write replaces the entire value for a key; there are no partial
/// updates at this layer. Implementations must be safe to share behind an
/// `Arc` across handlers.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Read the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError>;

    /// Replace the value stored under `key`.
    async fn put(&self, key: &str, value: Value) -> Result<(), StorageError>;
}

/// File-backed storage: one JSON object file holding all collections.
///
/// Writes go through a temp file followed by a rename, so readers never
/// observe a partially written file.
pub struct JsonFileStorage {
    path: PathBuf,
    // Serializes the read-modify-write cycle on the backing file
    lock: Mutex<()>,
}

impl JsonFileStorage {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    async fn read_all(&self) -> Result<HashMap<String, Value>, StorageError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(err) => Err(err.into()),
        }
    }

    async fn write_all(&self, collections: &HashMap<String, Value>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp = self.path.with_extension("json.tmp");
        let bytes = serde_json::to_vec_pretty(collections)?;
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl Storage for JsonFileStorage {
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let _guard = self.lock.lock().await;
        let collections = self.read_all().await?;
        Ok(collections.get(key).cloned())
    }

    async fn put(&self, key: &str, value: Value) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let mut collections = self.read_all().await?;
        collections.insert(key.to_owned(), value);
        self.write_all(&collections).await
    }
}

/// In-memory storage for tests.
#[derive(Default)]
pub struct MemoryStorage {
    map: Mutex<HashMap<String, Value>>,
}

impl MemoryStorage {
    /// Convenience constructor returning the trait-object form the store takes.
    #[must_use]
    pub fn shared() -> Arc<dyn Storage> {
        Arc::new(Self::default())
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        Ok(self.map.lock().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: Value) -> Result<(), StorageError> {
        self.map.lock().await.insert(key.to_owned(), value);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn test_memory_storage_roundtrip() {
        let storage = MemoryStorage::default();
        assert!(storage.get("nominations").await.unwrap().is_none());

        storage.put("nominations", json!([1, 2])).await.unwrap();
        assert_eq!(
            storage.get("nominations").await.unwrap(),
            Some(json!([1, 2]))
        );

        // put replaces the whole value
        storage.put("nominations", json!([3])).await.unwrap();
        assert_eq!(storage.get("nominations").await.unwrap(), Some(json!([3])));
    }

    #[tokio::test]
    async fn test_file_storage_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        let storage = JsonFileStorage::new(path.clone());

        assert!(storage.get("auditLog").await.unwrap().is_none());
        storage.put("auditLog", json!([{"id": 1}])).await.unwrap();
        storage.put("ipRateLimit", json!({"1.2.3.4": 99})).await.unwrap();

        assert_eq!(
            storage.get("auditLog").await.unwrap(),
            Some(json!([{"id": 1}]))
        );

        // Keys are independent collections in the same file
        assert_eq!(
            storage.get("ipRateLimit").await.unwrap(),
            Some(json!({"1.2.3.4": 99}))
        );
    }

    #[tokio::test]
    async fn test_file_storage_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");

        JsonFileStorage::new(path.clone())
            .put("nominations", json!(["a"]))
            .await
            .unwrap();

        let reopened = JsonFileStorage::new(path);
        assert_eq!(
            reopened.get("nominations").await.unwrap(),
            Some(json!(["a"]))
        );
    }

    #[tokio::test]
    async fn test_file_storage_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/data.json");
        let storage = JsonFileStorage::new(path);
        storage.put("nominations", json!([])).await.unwrap();
        assert_eq!(storage.get("nominations").await.unwrap(), Some(json!([])));
    }
}

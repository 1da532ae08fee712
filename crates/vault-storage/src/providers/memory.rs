//! In-memory object store using dashmap.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use tracing::debug;

use vault_core::config::MemoryStoreConfig;
use vault_core::error::AppError;
use vault_core::result::AppResult;
use vault_core::traits::object_store::ObjectStore;

/// In-memory object store.
///
/// Contents live as long as the process. An optional quota caps the total
/// number of value bytes; a put that would exceed it is rejected and leaves
/// the store untouched.
#[derive(Debug, Clone)]
pub struct MemoryObjectStore {
    /// Collection name reported to callers.
    collection: String,
    /// Records by key.
    records: Arc<DashMap<String, Bytes>>,
    /// Total value bytes currently held. Also serializes mutations.
    used_bytes: Arc<Mutex<u64>>,
    /// Byte quota (`None` = unlimited).
    quota_bytes: Option<u64>,
}

impl MemoryObjectStore {
    /// Create an empty store from configuration.
    pub fn new(collection: impl Into<String>, config: &MemoryStoreConfig) -> Self {
        Self {
            collection: collection.into(),
            records: Arc::new(DashMap::new()),
            used_bytes: Arc::new(Mutex::new(0)),
            quota_bytes: config.quota_bytes,
        }
    }

    /// Create an unlimited store.
    pub fn unlimited(collection: impl Into<String>) -> Self {
        Self::new(collection, &MemoryStoreConfig::default())
    }

    /// Total value bytes currently held.
    pub fn used_bytes(&self) -> AppResult<u64> {
        let used = self
            .used_bytes
            .lock()
            .map_err(|_| AppError::internal("Memory store lock poisoned"))?;
        Ok(*used)
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    fn provider_type(&self) -> &str {
        "memory"
    }

    fn collection(&self) -> &str {
        &self.collection
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn put(&self, key: &str, value: Bytes) -> AppResult<()> {
        let mut used = self
            .used_bytes
            .lock()
            .map_err(|_| AppError::internal("Memory store lock poisoned"))?;

        let previous = self.records.get(key).map(|v| v.len() as u64).unwrap_or(0);
        let next = *used - previous + value.len() as u64;

        if let Some(quota) = self.quota_bytes {
            if next > quota {
                return Err(AppError::quota_exceeded(format!(
                    "Writing {} bytes to '{}' would exceed the {quota} byte quota",
                    value.len(),
                    self.collection
                )));
            }
        }

        self.records.insert(key.to_string(), value);
        *used = next;
        debug!(key, used_bytes = next, "Stored record in memory");
        Ok(())
    }

    async fn get(&self, key: &str) -> AppResult<Option<Bytes>> {
        Ok(self.records.get(key).map(|entry| entry.value().clone()))
    }

    async fn get_all(&self) -> AppResult<Vec<(String, Bytes)>> {
        let mut all: Vec<(String, Bytes)> = self
            .records
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();
        all.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(all)
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let mut used = self
            .used_bytes
            .lock()
            .map_err(|_| AppError::internal("Memory store lock poisoned"))?;
        if let Some((_, removed)) = self.records.remove(key) {
            *used -= removed.len() as u64;
            debug!(key, used_bytes = *used, "Removed record from memory");
        }
        Ok(())
    }

    async fn count(&self) -> AppResult<usize> {
        Ok(self.records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_get_delete() {
        let store = MemoryObjectStore::unlimited("files");
        store.put("k1", Bytes::from("hello")).await.unwrap();

        assert_eq!(store.get("k1").await.unwrap(), Some(Bytes::from("hello")));
        assert_eq!(store.count().await.unwrap(), 1);

        store.delete("k1").await.unwrap();
        assert_eq!(store.get("k1").await.unwrap(), None);
        assert_eq!(store.used_bytes().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_missing_is_noop() {
        let store = MemoryObjectStore::unlimited("files");
        store.put("k1", Bytes::from("a")).await.unwrap();
        store.delete("missing").await.unwrap();
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_put_replaces() {
        let store = MemoryObjectStore::unlimited("files");
        store.put("k", Bytes::from("first")).await.unwrap();
        store.put("k", Bytes::from("second!")).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 1);
        assert_eq!(store.used_bytes().unwrap(), 7);
    }

    #[tokio::test]
    async fn test_get_all_sorted_by_key() {
        let store = MemoryObjectStore::unlimited("files");
        store.put("b", Bytes::from("2")).await.unwrap();
        store.put("a", Bytes::from("1")).await.unwrap();
        let keys: Vec<String> = store
            .get_all()
            .await
            .unwrap()
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_quota_rejects_and_keeps_state() {
        let store = MemoryObjectStore::new(
            "files",
            &MemoryStoreConfig {
                quota_bytes: Some(8),
            },
        );
        store.put("a", Bytes::from("12345")).await.unwrap();
        let err = store.put("b", Bytes::from("6789")).await.unwrap_err();
        assert!(err.is_quota_exceeded());
        assert_eq!(store.count().await.unwrap(), 1);
        assert_eq!(store.used_bytes().unwrap(), 5);

        // Replacing an existing key only counts the difference.
        store.put("a", Bytes::from("12345678")).await.unwrap();
        assert_eq!(store.used_bytes().unwrap(), 8);
    }
}

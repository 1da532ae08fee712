//! Store manager that dispatches to the configured object store provider.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::info;

use vault_core::config::StorageConfig;
use vault_core::error::AppError;
use vault_core::result::AppResult;
use vault_core::traits::object_store::ObjectStore;

/// Store manager that wraps the configured object store provider.
///
/// The provider is selected at construction time based on configuration.
#[derive(Debug, Clone)]
pub struct StoreManager {
    /// The inner object store.
    inner: Arc<dyn ObjectStore>,
}

impl StoreManager {
    /// Open the object store selected by configuration.
    pub async fn new(config: &StorageConfig) -> AppResult<Self> {
        let inner: Arc<dyn ObjectStore> = match config.provider.as_str() {
            #[cfg(feature = "local")]
            "local" => {
                info!(
                    root = %config.local.root_path,
                    database = %config.database_name,
                    collection = %config.collection,
                    "Initializing local object store"
                );
                Arc::new(crate::providers::LocalObjectStore::open(config).await?)
            }
            #[cfg(feature = "memory")]
            "memory" => {
                info!(
                    collection = %config.collection,
                    quota_bytes = ?config.memory.quota_bytes,
                    "Initializing in-memory object store"
                );
                Arc::new(crate::providers::MemoryObjectStore::new(
                    config.collection.clone(),
                    &config.memory,
                ))
            }
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown storage provider: '{other}'. Supported: local, memory"
                )));
            }
        };

        Ok(Self { inner })
    }
}

#[async_trait]
impl ObjectStore for StoreManager {
    fn provider_type(&self) -> &str {
        self.inner.provider_type()
    }

    fn collection(&self) -> &str {
        self.inner.collection()
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }

    async fn put(&self, key: &str, value: Bytes) -> AppResult<()> {
        self.inner.put(key, value).await
    }

    async fn get(&self, key: &str) -> AppResult<Option<Bytes>> {
        self.inner.get(key).await
    }

    async fn get_all(&self) -> AppResult<Vec<(String, Bytes)>> {
        self.inner.get_all().await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.inner.delete(key).await
    }

    async fn count(&self) -> AppResult<usize> {
        self.inner.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_selects_memory_provider() {
        let config = StorageConfig {
            provider: "memory".to_string(),
            ..StorageConfig::default()
        };
        let manager = StoreManager::new(&config).await.unwrap();
        assert_eq!(manager.provider_type(), "memory");
        assert_eq!(manager.collection(), "files");
    }

    #[tokio::test]
    async fn test_selects_local_provider() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = StorageConfig::default();
        config.local.root_path = dir.path().to_string_lossy().to_string();

        let manager = StoreManager::new(&config).await.unwrap();
        assert_eq!(manager.provider_type(), "local");
        assert!(manager.health_check().await.unwrap());
        assert!(dir.path().join("fileStorageDB/files").is_dir());
    }

    #[tokio::test]
    async fn test_unknown_provider_rejected() {
        let config = StorageConfig {
            provider: "indexeddb".to_string(),
            ..StorageConfig::default()
        };
        let err = StoreManager::new(&config).await.unwrap_err();
        assert_eq!(err.kind, vault_core::error::ErrorKind::Configuration);
    }
}

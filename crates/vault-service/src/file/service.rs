//! Content-addressed file storage service.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use vault_core::error::AppError;
use vault_core::result::AppResult;
use vault_core::traits::object_store::ObjectStore;
use vault_entity::file::{FileUpload, StoreReceipt, StoredFile};
use vault_storage::fingerprint::Fingerprinter;

/// Stores, lists, fetches and deletes [`StoredFile`] records keyed by their
/// content fingerprint.
///
/// Every operation issues a single request against the object store and
/// performs no retry; backend failures are returned to the caller as-is.
#[derive(Debug, Clone)]
pub struct FileStorageService {
    /// Backing object store.
    store: Arc<dyn ObjectStore>,
    /// Key derivation.
    fingerprinter: Fingerprinter,
}

impl FileStorageService {
    /// Creates a new file storage service.
    pub fn new(store: Arc<dyn ObjectStore>, fingerprinter: Fingerprinter) -> Self {
        Self {
            store,
            fingerprinter,
        }
    }

    /// Fingerprint and persist `upload`, replacing any record with the same
    /// key. Returns once the store reports the write durable.
    pub async fn store(&self, upload: FileUpload) -> AppResult<StoreReceipt> {
        let fingerprint = self.fingerprinter.fingerprint(&upload.data);

        let file = StoredFile {
            id: fingerprint.id,
            size: upload.data.len() as u64,
            name: upload.name,
            mime_type: upload.mime_type,
            data: upload.data,
            timestamp: Utc::now().timestamp_millis(),
        };

        self.store.put(&file.id, file.to_record()?).await?;

        info!(
            id = %file.id,
            name = %file.name,
            size = file.size,
            mode = %fingerprint.mode,
            "Stored file"
        );

        Ok(StoreReceipt {
            file,
            mode: fingerprint.mode,
        })
    }

    /// Snapshot of every stored file, in the store's enumeration order.
    pub async fn list_all(&self) -> AppResult<Vec<StoredFile>> {
        let records = self.store.get_all().await?;
        let files = records
            .into_iter()
            .map(|(key, raw)| decode(&key, &raw))
            .collect::<AppResult<Vec<_>>>()?;
        debug!(count = files.len(), "Listed files");
        Ok(files)
    }

    /// Look up a file by id. Returns `None` if there is no such file.
    pub async fn get(&self, id: &str) -> AppResult<Option<StoredFile>> {
        match self.store.get(id).await? {
            Some(raw) => Ok(Some(decode(id, &raw)?)),
            None => {
                debug!(id, "File not found");
                Ok(None)
            }
        }
    }

    /// Delete a file by id. Deleting an unknown id succeeds.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.store.delete(id).await?;
        info!(id, "Deleted file");
        Ok(())
    }

    /// Number of stored files.
    pub async fn count(&self) -> AppResult<usize> {
        self.store.count().await
    }

    /// Check that the backing store is usable.
    pub async fn health_check(&self) -> AppResult<bool> {
        self.store.health_check().await
    }
}

fn decode(key: &str, raw: &[u8]) -> AppResult<StoredFile> {
    let file = StoredFile::from_record(raw)?;
    if file.id != key {
        return Err(AppError::serialization(format!(
            "Record stored under '{key}' carries id '{}'",
            file.id
        )));
    }
    Ok(file)
}

//! Local filesystem object store.
//!
//! Layout under the configured root:
//!
//! ```text
//! <root>/<database>/schema.json
//! <root>/<database>/<collection>/<key>
//! ```

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{self, StreamExt, TryStreamExt};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use vault_core::config::StorageConfig;
use vault_core::error::{AppError, ErrorKind};
use vault_core::result::AppResult;
use vault_core::traits::object_store::ObjectStore;

/// Highest schema version this build understands.
pub const SCHEMA_VERSION: u32 = 1;

/// Name of the schema manifest inside the database directory.
const SCHEMA_FILE: &str = "schema.json";

/// Records read concurrently by `get_all`.
const READ_CONCURRENCY: usize = 16;

/// Contents of `schema.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SchemaManifest {
    /// Schema version the database was created with.
    pub version: u32,
    /// Collections created in this database.
    pub collections: Vec<String>,
}

/// Local filesystem object store.
#[derive(Debug, Clone)]
pub struct LocalObjectStore {
    /// Database directory.
    database_dir: PathBuf,
    /// Collection name.
    collection: String,
    /// Directory holding one file per record.
    collection_dir: PathBuf,
}

impl LocalObjectStore {
    /// Open (creating on first use) the configured database and collection.
    pub async fn open(config: &StorageConfig) -> AppResult<Self> {
        Self::open_at(
            Path::new(&config.local.root_path),
            &config.database_name,
            &config.collection,
        )
        .await
    }

    /// Open a database named `database` under `root`.
    pub async fn open_at(root: &Path, database: &str, collection: &str) -> AppResult<Self> {
        validate_name(database, "database")?;
        validate_name(collection, "collection")?;

        let database_dir = root.join(database);
        fs::create_dir_all(&database_dir).await.map_err(|e| {
            io_error(
                format!("Failed to create database directory {}", database_dir.display()),
                e,
            )
        })?;

        let store = Self {
            collection_dir: database_dir.join(collection),
            database_dir,
            collection: collection.to_string(),
        };
        store.ensure_schema().await?;
        store.remove_stale_temp_files().await?;
        Ok(store)
    }

    /// Read the schema manifest, creating it (and the collection) if absent.
    async fn ensure_schema(&self) -> AppResult<()> {
        let schema_path = self.database_dir.join(SCHEMA_FILE);

        let mut manifest = match fs::read(&schema_path).await {
            Ok(raw) => {
                let manifest: SchemaManifest = serde_json::from_slice(&raw)?;
                if manifest.version > SCHEMA_VERSION {
                    return Err(AppError::configuration(format!(
                        "Database {} has schema version {}, this build supports up to {SCHEMA_VERSION}",
                        self.database_dir.display(),
                        manifest.version
                    )));
                }
                manifest
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => SchemaManifest {
                version: SCHEMA_VERSION,
                collections: Vec::new(),
            },
            Err(e) => return Err(io_error("Failed to read schema manifest".to_string(), e)),
        };

        fs::create_dir_all(&self.collection_dir).await.map_err(|e| {
            io_error(
                format!("Failed to create collection {}", self.collection),
                e,
            )
        })?;

        if !manifest.collections.contains(&self.collection) {
            manifest.collections.push(self.collection.clone());
            let raw = serde_json::to_vec_pretty(&manifest)?;
            write_durable(&schema_path, &raw).await?;
            info!(
                database = %self.database_dir.display(),
                collection = %self.collection,
                version = manifest.version,
                "Created collection"
            );
        }
        Ok(())
    }

    /// Remove temp files left behind by writes interrupted mid-way.
    async fn remove_stale_temp_files(&self) -> AppResult<()> {
        let mut dir = fs::read_dir(&self.collection_dir)
            .await
            .map_err(|e| io_error("Failed to scan collection".to_string(), e))?;

        while let Some(entry) = dir
            .next_entry()
            .await
            .map_err(|e| io_error("Failed to read collection entry".to_string(), e))?
        {
            let name = entry.file_name().to_string_lossy().to_string();
            if name.starts_with('.') && name.ends_with(".tmp") {
                debug!(file = %name, "Removing stale temp file");
                fs::remove_file(entry.path())
                    .await
                    .map_err(|e| io_error(format!("Failed to remove {name}"), e))?;
            }
        }
        Ok(())
    }

    /// Resolve a record key to its file path.
    fn record_path(&self, key: &str) -> AppResult<PathBuf> {
        validate_name(key, "key")?;
        Ok(self.collection_dir.join(key))
    }

    /// Keys currently in the collection, ascending.
    async fn keys(&self) -> AppResult<Vec<String>> {
        let mut dir = fs::read_dir(&self.collection_dir)
            .await
            .map_err(|e| io_error("Failed to list collection".to_string(), e))?;

        let mut keys = Vec::new();
        while let Some(entry) = dir
            .next_entry()
            .await
            .map_err(|e| io_error("Failed to read collection entry".to_string(), e))?
        {
            let name = entry.file_name().to_string_lossy().to_string();
            if name.starts_with('.') {
                continue;
            }
            if validate_name(&name, "key").is_err() {
                debug!(file = %name, "Skipping non-record file in collection");
                continue;
            }
            keys.push(name);
        }
        keys.sort();
        Ok(keys)
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    fn provider_type(&self) -> &str {
        "local"
    }

    fn collection(&self) -> &str {
        &self.collection
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(fs::metadata(&self.collection_dir)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false))
    }

    async fn put(&self, key: &str, value: Bytes) -> AppResult<()> {
        let path = self.record_path(key)?;
        write_durable(&path, &value).await?;
        debug!(key, bytes = value.len(), "Wrote record");
        Ok(())
    }

    async fn get(&self, key: &str) -> AppResult<Option<Bytes>> {
        // No record can be stored under a key outside the key alphabet.
        let Ok(path) = self.record_path(key) else {
            debug!(key, "Lookup of unstorable key");
            return Ok(None);
        };
        match fs::read(&path).await {
            Ok(data) => Ok(Some(Bytes::from(data))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(format!("Failed to read record {key}"), e)),
        }
    }

    async fn get_all(&self) -> AppResult<Vec<(String, Bytes)>> {
        let keys = self.keys().await?;
        let records: Vec<Option<(String, Bytes)>> = stream::iter(keys)
            .map(|key| async move {
                // A record deleted between listing and reading is skipped.
                let value = self.get(&key).await?;
                Ok::<_, AppError>(value.map(|v| (key, v)))
            })
            .buffered(READ_CONCURRENCY)
            .try_collect()
            .await?;
        Ok(records.into_iter().flatten().collect())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let Ok(path) = self.record_path(key) else {
            return Ok(());
        };
        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!(key, "Deleted record");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(format!("Failed to delete record {key}"), e)),
        }
    }

    async fn count(&self) -> AppResult<usize> {
        Ok(self.keys().await?.len())
    }
}

/// Write `data` to `path` so that it is on disk before returning: write a
/// sibling temp file, fsync it, then rename over the target.
async fn write_durable(path: &Path, data: &[u8]) -> AppResult<()> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(|| AppError::internal(format!("Invalid record path {}", path.display())))?;
    let nonce: u32 = rand::thread_rng().r#gen();
    let tmp_path = path.with_file_name(format!(".{file_name}.{nonce:08x}.tmp"));

    let result = async {
        let mut file = fs::File::create(&tmp_path).await?;
        file.write_all(data).await?;
        file.sync_all().await?;
        drop(file);
        fs::rename(&tmp_path, path).await
    }
    .await;

    if let Err(e) = result {
        let _ = fs::remove_file(&tmp_path).await;
        return Err(io_error(format!("Failed to write {file_name}"), e));
    }
    Ok(())
}

/// Map an I/O error, keeping "disk full" distinguishable.
fn io_error(context: String, err: io::Error) -> AppError {
    let kind = match err.kind() {
        io::ErrorKind::StorageFull => ErrorKind::QuotaExceeded,
        _ => ErrorKind::Storage,
    };
    AppError::with_source(kind, format!("{context}: {err}"), err)
}

/// Keys and names become file names, so only a safe alphabet is accepted.
fn validate_name(name: &str, what: &str) -> AppResult<()> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(AppError::validation(format!("Invalid {what}: '{name}'")))
    }
}

//! JSON-file backed preference slots.

use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use vault_core::error::{AppError, ErrorKind};
use vault_core::result::AppResult;
use vault_core::traits::preference::PreferenceStore;

/// Preference slots persisted as a flat JSON object of strings.
///
/// The file is read once at open and rewritten on every change.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    /// Path of the JSON file.
    path: PathBuf,
    /// In-memory copy of the slots; the lock also orders writes.
    slots: Arc<Mutex<BTreeMap<String, String>>>,
}

impl FilePreferenceStore {
    /// Open the preference file, starting empty if it does not exist.
    ///
    /// A file that cannot be parsed is ignored with a warning, the same way
    /// an unreadable preference falls back to defaults.
    pub async fn open(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();
        let slots = match fs::read(&path).await {
            Ok(raw) => match serde_json::from_slice(&raw) {
                Ok(slots) => slots,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Ignoring unreadable preference file");
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to read preferences: {}", path.display()),
                    e,
                ));
            }
        };

        Ok(Self {
            path,
            slots: Arc::new(Mutex::new(slots)),
        })
    }

    async fn persist(&self, slots: &BTreeMap<String, String>) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let raw = serde_json::to_vec_pretty(slots)?;
        fs::write(&self.path, raw).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write preferences: {}", self.path.display()),
                e,
            )
        })?;
        debug!(path = %self.path.display(), slots = slots.len(), "Persisted preferences");
        Ok(())
    }
}

#[async_trait]
impl PreferenceStore for FilePreferenceStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.slots.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let mut slots = self.slots.lock().await;
        let mut next = slots.clone();
        next.insert(key.to_string(), value.to_string());
        self.persist(&next).await?;
        *slots = next;
        Ok(())
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        let mut slots = self.slots.lock().await;
        if !slots.contains_key(key) {
            return Ok(());
        }
        let mut next = slots.clone();
        next.remove(key);
        self.persist(&next).await?;
        *slots = next;
        Ok(())
    }
}

//! In-memory preference slots.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use vault_core::result::AppResult;
use vault_core::traits::preference::PreferenceStore;

/// Preference slots that live only as long as the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    slots: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryPreferenceStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferenceStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.slots.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.slots
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        self.slots.write().await.remove(key);
        Ok(())
    }
}

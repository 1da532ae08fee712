//! Preference slot trait, a tiny string-to-string store kept apart from
//! the file collection.

use async_trait::async_trait;

use crate::result::AppResult;

/// Persistent string slots for user preferences.
#[async_trait]
pub trait PreferenceStore: Send + Sync + std::fmt::Debug + 'static {
    /// Read the value of a slot. Returns `None` if never written.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Write the value of a slot, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Remove a slot. Absent slots are a no-op.
    async fn remove(&self, key: &str) -> AppResult<()>;
}

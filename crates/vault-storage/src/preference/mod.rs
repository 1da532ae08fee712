//! Preference slot providers.

pub mod file;
pub mod memory;

use std::sync::Arc;

use tracing::info;

use vault_core::config::PreferenceConfig;
use vault_core::error::AppError;
use vault_core::result::AppResult;
use vault_core::traits::preference::PreferenceStore;

pub use file::FilePreferenceStore;
pub use memory::MemoryPreferenceStore;

/// Build the preference store selected by configuration.
pub async fn open_preference_store(config: &PreferenceConfig) -> AppResult<Arc<dyn PreferenceStore>> {
    match config.provider.as_str() {
        "file" => {
            info!(path = %config.path, "Initializing file preference store");
            Ok(Arc::new(FilePreferenceStore::open(&config.path).await?))
        }
        "memory" => {
            info!("Initializing in-memory preference store");
            Ok(Arc::new(MemoryPreferenceStore::new()))
        }
        other => Err(AppError::configuration(format!(
            "Unknown preference provider: '{other}'. Supported: file, memory"
        ))),
    }
}

//! View layer configuration.

use serde::{Deserialize, Serialize};

/// Settings consumed by the view-model rather than the storage layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Largest upload accepted by the view before calling the store
    /// (default 100 MB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
    /// Delay before a transient object reference is revoked.
    #[serde(default = "default_revoke_delay")]
    pub revoke_delay_ms: u64,
    /// Directory downloads are written to.
    #[serde(default = "default_download_dir")]
    pub download_dir: String,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            max_upload_size_bytes: default_max_upload(),
            revoke_delay_ms: default_revoke_delay(),
            download_dir: default_download_dir(),
        }
    }
}

fn default_max_upload() -> u64 {
    104_857_600 // 100 MB
}

fn default_revoke_delay() -> u64 {
    1000
}

fn default_download_dir() -> String {
    "./data/downloads".to_string()
}

//! Shared test helpers for integration tests.

use std::sync::Arc;

use bytes::Bytes;
use tempfile::TempDir;

use filevault::Vault;
use filevault::vault_core::config::AppConfig;
use filevault::vault_entity::file::FileUpload;
use filevault::vault_service::file::ViewingContext;
use filevault::vault_service::preference::FixedThemeProbe;

/// Test vault context backed by a temporary directory.
pub struct TestVault {
    /// The wired vault.
    pub vault: Vault,
    /// Root of all on-disk state; removed on drop.
    pub dir: TempDir,
}

impl TestVault {
    /// Open a vault on the local provider in a fresh directory.
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Open a vault after adjusting the default test configuration.
    pub async fn with_config(adjust: impl FnOnce(&mut AppConfig)) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let mut config = test_config(&dir);
        adjust(&mut config);
        let vault = Vault::open(config).await.expect("Failed to open vault");
        Self { vault, dir }
    }

    /// Open a vault with a custom viewing context.
    pub async fn with_context(context: Arc<dyn ViewingContext>) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let vault = Vault::open_with(test_config(&dir), context, &FixedThemeProbe(None))
            .await
            .expect("Failed to open vault");
        Self { vault, dir }
    }

    /// Open a second vault over the same on-disk state.
    pub async fn reopen(&self) -> Vault {
        Vault::open(self.vault.config.clone())
            .await
            .expect("Failed to reopen vault")
    }
}

/// Configuration rooted entirely inside `dir`.
pub fn test_config(dir: &TempDir) -> AppConfig {
    let root = dir.path();
    let mut config = AppConfig::default();
    config.storage.local.root_path = root.join("db").to_string_lossy().to_string();
    config.preferences.path = root.join("preferences.json").to_string_lossy().to_string();
    config.preferences.system_theme = Some("light".to_string());
    config.view.download_dir = root.join("downloads").to_string_lossy().to_string();
    config.view.revoke_delay_ms = 20;
    config
}

/// An upload with the given name and content.
pub fn upload(name: &str, body: &[u8]) -> FileUpload {
    FileUpload::new(name, "text/plain", Bytes::copy_from_slice(body))
}

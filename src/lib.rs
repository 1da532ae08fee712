//! FileVault: a content-addressed personal file vault.
//!
//! This crate wires the workspace crates together: it loads configuration,
//! initializes logging, opens the object and preference stores, and builds
//! the services and the view-model on top of them.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{EnvFilter, fmt};

use vault_core::config::{AppConfig, LoggingConfig};
use vault_core::error::AppError;
use vault_core::result::AppResult;
use vault_service::file::{
    DownloadDirectory, FileStorageService, ObjectUrlRegistry, OpenService, ViewingContext,
};
use vault_service::preference::{ConfiguredThemeProbe, PreferenceService, SystemThemeProbe};
use vault_service::view::VaultView;
use vault_storage::fingerprint::Fingerprinter;
use vault_storage::manager::StoreManager;
use vault_storage::preference::open_preference_store;

pub use vault_core;
pub use vault_entity;
pub use vault_service;
pub use vault_storage;

/// Load configuration from `config/default.toml`, the overlay named by
/// `VAULT_ENV` (default `development`), and `VAULT__*` variables.
pub fn load_configuration() -> AppResult<AppConfig> {
    let env = std::env::var("VAULT_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging. Safe to call more than once; later calls
/// leave the first subscriber in place.
pub fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let result = match config.format.as_str() {
        "json" => fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .try_init(),
        _ => fmt()
            .pretty()
            .with_env_filter(filter)
            .with_target(true)
            .try_init(),
    };

    if result.is_err() {
        tracing::debug!("Logging already initialized");
    }
}

/// A fully wired vault.
#[derive(Debug, Clone)]
pub struct Vault {
    /// Configuration the vault was opened with.
    pub config: AppConfig,
    /// Content-addressed file storage.
    pub files: Arc<FileStorageService>,
    /// Theme preference.
    pub preferences: PreferenceService,
    /// View-model for the vault page.
    pub view: VaultView,
}

impl Vault {
    /// Open a vault whose "open" action downloads into `view.download_dir`.
    pub async fn open(config: AppConfig) -> AppResult<Self> {
        let downloads = Arc::new(DownloadDirectory::new(&config.view.download_dir));
        let probe = ConfiguredThemeProbe::new(config.preferences.system_theme.clone());
        Self::open_with(config, downloads, &probe).await
    }

    /// Open a vault with a custom viewing context and system theme probe.
    pub async fn open_with(
        config: AppConfig,
        viewing_context: Arc<dyn ViewingContext>,
        probe: &dyn SystemThemeProbe,
    ) -> AppResult<Self> {
        tracing::info!("Opening FileVault v{}", env!("CARGO_PKG_VERSION"));

        // ── Step 1: Object store ─────────────────────────────────────
        let store = StoreManager::new(&config.storage)
            .await
            .map_err(|e| AppError::with_source(e.kind, "Object store init failed", e))?;

        // ── Step 2: Fingerprinting ───────────────────────────────────
        let fingerprinter = Fingerprinter::from_config(&config.storage.fingerprint)?;
        match fingerprinter.algorithm() {
            Some(algorithm) => tracing::info!(algorithm, "Content addressing enabled"),
            None => tracing::warn!("No digest configured, stored files will not be deduplicated"),
        }

        let files = Arc::new(FileStorageService::new(Arc::new(store), fingerprinter));

        // ── Step 3: Preferences ──────────────────────────────────────
        let preference_store = open_preference_store(&config.preferences).await?;
        let preferences =
            PreferenceService::load(preference_store, &config.preferences, probe).await?;

        // ── Step 4: View ─────────────────────────────────────────────
        let opener = OpenService::new(
            Arc::clone(&files),
            ObjectUrlRegistry::new(),
            viewing_context,
            Duration::from_millis(config.view.revoke_delay_ms),
        );
        let view = VaultView::new(
            Arc::clone(&files),
            opener,
            preferences.clone(),
            config.view.clone(),
        );
        view.refresh().await?;

        tracing::info!(
            provider = %config.storage.provider,
            files = view.rows().await.len(),
            "FileVault ready"
        );

        Ok(Self {
            config,
            files,
            preferences,
            view,
        })
    }
}

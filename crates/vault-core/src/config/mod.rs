//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section, and every field carries a default so an empty file is valid.

pub mod logging;
pub mod preferences;
pub mod storage;
pub mod view;

use serde::{Deserialize, Serialize};

pub use self::logging::LoggingConfig;
pub use self::preferences::PreferenceConfig;
pub use self::storage::{FingerprintConfig, LocalStoreConfig, MemoryStoreConfig, StorageConfig};
pub use self::view::ViewConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Object store settings.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Preference slot settings.
    #[serde(default)]
    pub preferences: PreferenceConfig,
    /// View layer settings.
    #[serde(default)]
    pub view: ViewConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `VAULT__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("VAULT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let parsed: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        tracing::debug!(
            env,
            provider = %parsed.storage.provider,
            database = %parsed.storage.database_name,
            "Configuration loaded"
        );
        Ok(parsed)
    }

    /// Parse configuration from a TOML string, applying defaults for
    /// every missing field.
    pub fn from_toml(source: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?;
        Ok(config.try_deserialize()?)
    }
}

//! Object store configuration.

use serde::{Deserialize, Serialize};

/// Top-level object store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Object store provider: `"local"` or `"memory"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Name of the local database.
    #[serde(default = "default_database_name")]
    pub database_name: String,
    /// Name of the single record collection inside the database.
    #[serde(default = "default_collection")]
    pub collection: String,
    /// Local filesystem provider configuration.
    #[serde(default)]
    pub local: LocalStoreConfig,
    /// In-memory provider configuration.
    #[serde(default)]
    pub memory: MemoryStoreConfig,
    /// Content fingerprint configuration.
    #[serde(default)]
    pub fingerprint: FingerprintConfig,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            database_name: default_database_name(),
            collection: default_collection(),
            local: LocalStoreConfig::default(),
            memory: MemoryStoreConfig::default(),
            fingerprint: FingerprintConfig::default(),
        }
    }
}

/// Local filesystem object store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalStoreConfig {
    /// Directory holding all local databases.
    #[serde(default = "default_local_root")]
    pub root_path: String,
}

impl Default for LocalStoreConfig {
    fn default() -> Self {
        Self {
            root_path: default_local_root(),
        }
    }
}

/// In-memory object store configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryStoreConfig {
    /// Total bytes the store may hold (`None` = unlimited).
    #[serde(default)]
    pub quota_bytes: Option<u64>,
}

/// Content fingerprint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FingerprintConfig {
    /// Digest algorithm: `"sha256"`, or `"none"` to run without a digest
    /// and fall back to random identifiers.
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
}

impl Default for FingerprintConfig {
    fn default() -> Self {
        Self {
            algorithm: default_algorithm(),
        }
    }
}

fn default_provider() -> String {
    "local".to_string()
}

fn default_database_name() -> String {
    "fileStorageDB".to_string()
}

fn default_collection() -> String {
    "files".to_string()
}

fn default_local_root() -> String {
    "./data/db".to_string()
}

fn default_algorithm() -> String {
    "sha256".to_string()
}

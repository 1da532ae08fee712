//! Result of a store operation.

use serde::{Deserialize, Serialize};

use super::model::StoredFile;

/// How the primary key of a stored file was derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FingerprintMode {
    /// The key is a digest of the content; identical bytes share one record.
    ContentAddressed,
    /// No digest was available; the key is a random token and identical
    /// bytes stored twice produce two records.
    Random,
}

impl FingerprintMode {
    /// Whether repeated stores of the same content are deduplicated.
    pub fn deduplicates(&self) -> bool {
        matches!(self, Self::ContentAddressed)
    }
}

impl std::fmt::Display for FingerprintMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ContentAddressed => write!(f, "content_addressed"),
            Self::Random => write!(f, "random"),
        }
    }
}

/// What `store` wrote, and whether it was a deduplicated or best-effort
/// insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreReceipt {
    /// The record as persisted.
    pub file: StoredFile,
    /// How `file.id` was derived.
    pub mode: FingerprintMode,
}

impl StoreReceipt {
    /// The primary key the record was stored under.
    pub fn id(&self) -> &str {
        &self.file.id
    }
}

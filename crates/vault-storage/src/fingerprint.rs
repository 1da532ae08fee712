//! Content fingerprinting: SHA-256 when available, random tokens otherwise.

use std::sync::Arc;

use rand::Rng;
use rand::distributions::Alphanumeric;
use sha2::{Digest, Sha256};
use tracing::debug;

use vault_core::config::FingerprintConfig;
use vault_core::error::AppError;
use vault_core::result::AppResult;
use vault_core::traits::hasher::ContentHasher;
use vault_entity::file::FingerprintMode;

/// Length of the random suffix of a fallback token.
const RANDOM_SUFFIX_LEN: usize = 9;

/// SHA-256 content hasher.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Hasher;

impl ContentHasher for Sha256Hasher {
    fn algorithm(&self) -> &str {
        "sha256"
    }

    fn hash_hex(&self, data: &[u8]) -> AppResult<String> {
        Ok(format!("{:x}", Sha256::digest(data)))
    }
}

/// A derived primary key together with how it was derived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint {
    /// The key to store the record under.
    pub id: String,
    /// Whether `id` depends only on the content.
    pub mode: FingerprintMode,
}

/// Derives record keys from file content.
///
/// With a hasher the key is the hex digest of the bytes. Without one, or
/// when the hasher fails, the key is `<epoch millis base36>-<9 random
/// alphanumerics>` and the fingerprint is reported as
/// [`FingerprintMode::Random`].
#[derive(Debug, Clone)]
pub struct Fingerprinter {
    hasher: Option<Arc<dyn ContentHasher>>,
}

impl Fingerprinter {
    /// Create a fingerprinter using the given hasher.
    pub fn new(hasher: Arc<dyn ContentHasher>) -> Self {
        Self {
            hasher: Some(hasher),
        }
    }

    /// Create a fingerprinter with no digest available.
    pub fn unavailable() -> Self {
        Self { hasher: None }
    }

    /// Build a fingerprinter from configuration.
    pub fn from_config(config: &FingerprintConfig) -> AppResult<Self> {
        match config.algorithm.as_str() {
            "sha256" => Ok(Self::new(Arc::new(Sha256Hasher))),
            "none" => Ok(Self::unavailable()),
            other => Err(AppError::configuration(format!(
                "Unknown fingerprint algorithm: '{other}'. Supported: sha256, none"
            ))),
        }
    }

    /// Name of the digest in use, if any.
    pub fn algorithm(&self) -> Option<&str> {
        self.hasher.as_ref().map(|h| h.algorithm())
    }

    /// Derive the key for `data`.
    pub fn fingerprint(&self, data: &[u8]) -> Fingerprint {
        if let Some(hasher) = &self.hasher {
            match hasher.hash_hex(data) {
                Ok(id) => {
                    return Fingerprint {
                        id,
                        mode: FingerprintMode::ContentAddressed,
                    };
                }
                Err(e) => {
                    debug!(algorithm = hasher.algorithm(), error = %e, "Digest failed, using random id");
                }
            }
        } else {
            debug!("No digest available, using random id");
        }

        Fingerprint {
            id: random_token(),
            mode: FingerprintMode::Random,
        }
    }
}

/// Time-prefixed random token used when no digest is available.
fn random_token() -> String {
    let millis = chrono::Utc::now().timestamp_millis().max(0) as u64;
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(RANDOM_SUFFIX_LEN)
        .map(char::from)
        .collect();
    format!("{}-{}", to_base36(millis), suffix.to_lowercase())
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

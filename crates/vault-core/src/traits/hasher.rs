//! Content hasher trait used to derive record keys from file bytes.

use crate::result::AppResult;

/// A cryptographic digest over raw bytes, rendered as lowercase hex.
///
/// An implementation that cannot compute its digest in the current
/// environment returns an error; callers treat that as "digest
/// unavailable" rather than as a failed operation.
pub trait ContentHasher: Send + Sync + std::fmt::Debug + 'static {
    /// Name of the digest algorithm (e.g., "sha256").
    fn algorithm(&self) -> &str;

    /// Digest `data` and return the lowercase hex encoding.
    fn hash_hex(&self, data: &[u8]) -> AppResult<String>;
}

//! # vault-storage
//!
//! Storage provider implementations for FileVault:
//!
//! - **local**: one directory per database, one file per record, durable
//!   writes through write-sync-rename
//! - **memory**: in-process store using [dashmap](https://crates.io/crates/dashmap),
//!   with an optional byte quota
//!
//! Also provides the preference slot providers and the content
//! fingerprinting used to derive record keys.

pub mod fingerprint;
pub mod manager;
pub mod preference;
pub mod providers;

pub use fingerprint::{Fingerprint, Fingerprinter, Sha256Hasher};
pub use manager::StoreManager;

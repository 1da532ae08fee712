//! # vault-core
//!
//! Core crate for FileVault. Contains the object store, preference store
//! and content hasher traits, configuration schemas, and the unified
//! error system.
//!
//! This crate has **no** internal dependencies on other FileVault crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;

//! # vault-entity
//!
//! Domain entity models for FileVault. Every struct in this crate is either
//! a persisted record or a domain value object exchanged between the
//! storage service and the view layer. All entities derive `Debug`, `Clone`,
//! `Serialize` and `Deserialize`.

pub mod file;
pub mod preference;

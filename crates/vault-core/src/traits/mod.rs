//! Core traits defined in `vault-core` and implemented by other crates.

pub mod hasher;
pub mod object_store;
pub mod preference;

pub use hasher::ContentHasher;
pub use object_store::ObjectStore;
pub use preference::PreferenceStore;

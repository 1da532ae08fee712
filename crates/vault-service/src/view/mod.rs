//! Headless view-model for the vault page.

pub mod row;
pub mod state;

pub use row::{FileRow, Notice, format_size};
pub use state::{VaultView, ViewSnapshot};

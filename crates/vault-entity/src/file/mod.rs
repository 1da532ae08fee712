//! File-related entities.

pub mod model;
pub mod receipt;
pub mod upload;

pub use model::StoredFile;
pub use receipt::{FingerprintMode, StoreReceipt};
pub use upload::FileUpload;

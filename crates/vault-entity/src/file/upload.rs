//! Raw file handed to the vault for storage.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// A user-selected file before it is fingerprinted and stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileUpload {
    /// File name as selected by the user.
    pub name: String,
    /// Reported MIME type (empty when unknown).
    pub mime_type: String,
    /// Full file content.
    pub data: Bytes,
}

impl FileUpload {
    /// Create an upload from in-memory content.
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Size of the content in bytes.
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

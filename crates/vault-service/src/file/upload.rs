//! Building uploads from files on disk.

use std::path::Path;

use bytes::Bytes;
use tokio::fs;

use vault_core::error::{AppError, ErrorKind};
use vault_core::result::AppResult;
use vault_entity::file::FileUpload;

/// Read a file from disk into a [`FileUpload`], taking the name from the
/// path and guessing the MIME type from its extension.
pub async fn upload_from_path(path: &Path) -> AppResult<FileUpload> {
    let data = fs::read(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            AppError::not_found(format!("File not found: {}", path.display()))
        } else {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to read file: {}", path.display()),
                e,
            )
        }
    })?;

    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload")
        .to_string();
    let mime_type = mime_from_name(&name).unwrap_or_default();

    Ok(FileUpload::new(name, mime_type, Bytes::from(data)))
}

/// Guess MIME type from a file name extension.
pub fn mime_from_name(name: &str) -> Option<String> {
    mime_guess::from_path(name)
        .first()
        .map(|m| m.essence_str().to_string())
}

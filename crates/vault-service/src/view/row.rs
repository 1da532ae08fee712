//! Display rows and notices rendered by the vault view.

use serde::Serialize;

use vault_core::error::{AppError, ErrorKind};
use vault_entity::file::StoredFile;

/// One line of the file list. Carries no content bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRow {
    /// File id (content fingerprint or fallback token).
    pub id: String,
    /// File name.
    pub name: String,
    /// MIME type, `"unknown"` when the file reported none.
    pub mime_type: String,
    /// Size in bytes.
    pub size: u64,
    /// Human-readable size, e.g. `"1.5 KB"`.
    pub size_label: String,
    /// Capture time in milliseconds since the Unix epoch.
    pub timestamp: i64,
    /// Capture time rendered as `YYYY-MM-DD HH:MM:SS` UTC.
    pub captured_at: String,
}

impl From<&StoredFile> for FileRow {
    fn from(file: &StoredFile) -> Self {
        Self {
            id: file.id.clone(),
            name: file.name.clone(),
            mime_type: if file.mime_type.is_empty() {
                "unknown".to_string()
            } else {
                file.mime_type.clone()
            },
            size: file.size,
            size_label: format_size(file.size),
            timestamp: file.timestamp,
            captured_at: file
                .captured_at()
                .map(|at| at.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_default(),
        }
    }
}

/// A blocking notification raised by a failed action. Stays until dismissed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    /// Error category.
    pub kind: ErrorKind,
    /// Message shown to the user.
    pub message: String,
}

impl From<&AppError> for Notice {
    fn from(err: &AppError) -> Self {
        let message = match err.kind {
            ErrorKind::QuotaExceeded => {
                format!("Storage is full. Delete some files and try again. ({})", err.message)
            }
            _ => err.message.clone(),
        };
        Self {
            kind: err.kind,
            message,
        }
    }
}

/// Format a byte count with binary units.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

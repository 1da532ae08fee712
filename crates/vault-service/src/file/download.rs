//! Viewing context that saves files into a downloads directory.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::info;

use vault_core::error::{AppError, ErrorKind};
use vault_core::result::AppResult;

use super::object_url::{ObjectBlob, ObjectUrl};
use super::open::ViewingContext;

/// Headless viewing context: there is no viewer, so every open becomes a
/// download into `dir`. Existing files are never overwritten; a numbered
/// name such as `report (1).pdf` is chosen instead.
#[derive(Debug, Clone)]
pub struct DownloadDirectory {
    dir: PathBuf,
}

impl DownloadDirectory {
    /// Create a download sink writing into `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory downloads are written to.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the first free file in the download directory for
    /// `file_name`. The file is created exclusively, so a concurrent
    /// download of the same name moves on to the next number.
    async fn create_target(&self, file_name: &str) -> AppResult<(PathBuf, fs::File)> {
        let safe = sanitize_file_name(file_name);
        let (stem, ext) = match safe.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => (stem.to_string(), format!(".{ext}")),
            _ => (safe.clone(), String::new()),
        };

        let mut candidate = self.dir.join(&safe);
        let mut n = 1;
        loop {
            match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&candidate)
                .await
            {
                Ok(file) => return Ok((candidate, file)),
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                    candidate = self.dir.join(format!("{stem} ({n}){ext}"));
                    n += 1;
                }
                Err(e) => {
                    return Err(AppError::with_source(
                        ErrorKind::Storage,
                        format!("Failed to create download: {}", candidate.display()),
                        e,
                    ));
                }
            }
        }
    }
}

#[async_trait]
impl ViewingContext for DownloadDirectory {
    async fn open(&self, _url: &ObjectUrl, _blob: &ObjectBlob) -> AppResult<bool> {
        Ok(false)
    }

    async fn download(
        &self,
        url: &ObjectUrl,
        blob: &ObjectBlob,
        file_name: &str,
    ) -> AppResult<()> {
        fs::create_dir_all(&self.dir).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create download directory: {}", self.dir.display()),
                e,
            )
        })?;

        let (target, mut file) = self.create_target(file_name).await?;
        let written = async {
            file.write_all(&blob.data).await?;
            file.flush().await
        }
        .await;
        written.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write download: {}", target.display()),
                e,
            )
        })?;

        info!(url = %url, path = %target.display(), bytes = blob.data.len(), "Downloaded file");
        Ok(())
    }
}

/// File names are user-supplied; keep only the final path component.
fn sanitize_file_name(name: &str) -> String {
    let last = name.rsplit(['/', '\\']).next().unwrap_or("").trim();
    match last {
        "" | "." | ".." => "download".to_string(),
        other => other.to_string(),
    }
}

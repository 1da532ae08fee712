//! Opening stored files: view in place when possible, download otherwise.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, warn};

use vault_core::error::AppError;
use vault_core::result::AppResult;

use super::object_url::{ObjectBlob, ObjectUrl, ObjectUrlRegistry};
use super::service::FileStorageService;

/// Where opened files are shown: a viewer, a download sink, or both.
#[async_trait]
pub trait ViewingContext: Send + Sync + std::fmt::Debug + 'static {
    /// Try to show the blob behind `url`. Returns `false` if no viewer could
    /// take it, in which case the caller falls back to a download.
    async fn open(&self, url: &ObjectUrl, blob: &ObjectBlob) -> AppResult<bool>;

    /// Save the blob behind `url` under `file_name`.
    async fn download(&self, url: &ObjectUrl, blob: &ObjectBlob, file_name: &str)
    -> AppResult<()>;
}

/// Which path an open took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenAction {
    /// A viewer accepted the file.
    Viewed,
    /// The file was handed to the download sink.
    Downloaded,
}

/// Result of opening a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenOutcome {
    /// The transient URL that was used. It is revoked shortly after.
    pub url: ObjectUrl,
    /// Which path was taken.
    pub action: OpenAction,
}

/// Materializes stored files as object URLs and hands them to a
/// [`ViewingContext`].
#[derive(Debug, Clone)]
pub struct OpenService {
    /// File storage.
    files: Arc<FileStorageService>,
    /// Live object URLs.
    urls: ObjectUrlRegistry,
    /// Viewer / download sink.
    context: Arc<dyn ViewingContext>,
    /// How long a URL stays live after an open.
    revoke_delay: Duration,
}

impl OpenService {
    /// Creates a new open service.
    pub fn new(
        files: Arc<FileStorageService>,
        urls: ObjectUrlRegistry,
        context: Arc<dyn ViewingContext>,
        revoke_delay: Duration,
    ) -> Self {
        Self {
            files,
            urls,
            context,
            revoke_delay,
        }
    }

    /// The registry holding the URLs this service creates.
    pub fn registry(&self) -> &ObjectUrlRegistry {
        &self.urls
    }

    /// Open the file with the given id.
    ///
    /// The object URL is scheduled for revocation whichever path is taken,
    /// including when the download itself fails.
    pub async fn open(&self, id: &str) -> AppResult<OpenOutcome> {
        let file = self
            .files
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("File {id} not found")))?;

        let blob = ObjectBlob {
            mime_type: file.content_type().to_string(),
            data: file.data,
        };
        let url = self.urls.create(blob.clone()).await;
        self.urls.revoke_after(url.clone(), self.revoke_delay);

        let viewed = match self.context.open(&url, &blob).await {
            Ok(viewed) => viewed,
            Err(e) => {
                warn!(id, error = %e, "Viewer failed, falling back to download");
                false
            }
        };

        let action = if viewed {
            OpenAction::Viewed
        } else {
            self.context.download(&url, &blob, &file.name).await?;
            OpenAction::Downloaded
        };

        info!(id, name = %file.name, ?action, "Opened file");
        Ok(OpenOutcome { url, action })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    use bytes::Bytes;
    use vault_core::error::ErrorKind;
    use vault_entity::file::FileUpload;
    use vault_storage::fingerprint::{Fingerprinter, Sha256Hasher};
    use vault_storage::providers::MemoryObjectStore;

    /// Records what was asked of it.
    #[derive(Debug, Default)]
    struct RecordingContext {
        viewer: Option<bool>,
        fail_download: bool,
        downloads: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ViewingContext for RecordingContext {
        async fn open(&self, _url: &ObjectUrl, _blob: &ObjectBlob) -> AppResult<bool> {
            self.viewer
                .ok_or_else(|| AppError::internal("viewer blocked"))
        }

        async fn download(
            &self,
            _url: &ObjectUrl,
            _blob: &ObjectBlob,
            file_name: &str,
        ) -> AppResult<()> {
            if self.fail_download {
                return Err(AppError::storage("disk gone"));
            }
            self.downloads.lock().unwrap().push(file_name.to_string());
            Ok(())
        }
    }

    async fn setup(context: Arc<RecordingContext>) -> (OpenService, String) {
        let files = Arc::new(FileStorageService::new(
            Arc::new(MemoryObjectStore::unlimited("files")),
            Fingerprinter::new(Arc::new(Sha256Hasher)),
        ));
        let receipt = files
            .store(FileUpload::new("notes.txt", "", Bytes::from_static(b"hi")))
            .await
            .unwrap();
        let service = OpenService::new(
            files,
            ObjectUrlRegistry::new(),
            context,
            Duration::from_millis(1000),
        );
        (service, receipt.file.id)
    }

    #[tokio::test(start_paused = true)]
    async fn test_viewer_accepts() {
        let context = Arc::new(RecordingContext {
            viewer: Some(true),
            ..Default::default()
        });
        let (service, id) = setup(context.clone()).await;

        let outcome = service.open(&id).await.unwrap();
        assert_eq!(outcome.action, OpenAction::Viewed);
        assert!(context.downloads.lock().unwrap().is_empty());

        let blob = service.registry().resolve(&outcome.url).await.unwrap();
        assert_eq!(blob.mime_type, "application/octet-stream");

        tokio::time::sleep(Duration::from_millis(1001)).await;
        assert!(service.registry().is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_falls_back_to_download() {
        for viewer in [Some(false), None] {
            let context = Arc::new(RecordingContext {
                viewer,
                ..Default::default()
            });
            let (service, id) = setup(context.clone()).await;

            let outcome = service.open(&id).await.unwrap();
            assert_eq!(outcome.action, OpenAction::Downloaded);
            assert_eq!(*context.downloads.lock().unwrap(), vec!["notes.txt"]);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_url_revoked_when_download_fails() {
        let context = Arc::new(RecordingContext {
            viewer: Some(false),
            fail_download: true,
            ..Default::default()
        });
        let (service, id) = setup(context).await;

        assert!(service.open(&id).await.is_err());
        assert_eq!(service.registry().len().await, 1);
        tokio::time::sleep(Duration::from_millis(1001)).await;
        assert!(service.registry().is_empty().await);
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let (service, _) = setup(Arc::new(RecordingContext::default())).await;
        let err = service.open("missing").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert!(service.registry().is_empty().await);
    }
}

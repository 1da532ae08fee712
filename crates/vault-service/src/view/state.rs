//! The vault view-model: wires user actions to the services and keeps the
//! state a renderer draws from.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use vault_core::config::ViewConfig;
use vault_core::error::AppError;
use vault_core::result::AppResult;
use vault_entity::file::{FileUpload, StoreReceipt};
use vault_entity::preference::Theme;

use super::row::{FileRow, Notice};
use crate::file::{FileStorageService, OpenOutcome, OpenService};
use crate::preference::PreferenceService;

/// Mutable view state, guarded by the action lock.
#[derive(Debug, Default)]
struct ViewState {
    rows: Vec<FileRow>,
    notice: Option<Notice>,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSnapshot {
    /// File list, newest first.
    pub rows: Vec<FileRow>,
    /// Pending blocking notification, if any.
    pub notice: Option<Notice>,
    /// Active theme.
    pub theme: Theme,
}

/// Headless view-model for the vault page.
///
/// Actions run one at a time: an upload's store completes before its
/// refresh starts, and a second action waits for the first to finish. A
/// failed action records a [`Notice`] and returns the error; nothing is
/// retried.
#[derive(Debug, Clone)]
pub struct VaultView {
    files: Arc<FileStorageService>,
    opener: OpenService,
    preferences: PreferenceService,
    config: ViewConfig,
    state: Arc<Mutex<ViewState>>,
}

impl VaultView {
    /// Creates a new view. Call [`VaultView::refresh`] to populate the list.
    pub fn new(
        files: Arc<FileStorageService>,
        opener: OpenService,
        preferences: PreferenceService,
        config: ViewConfig,
    ) -> Self {
        Self {
            files,
            opener,
            preferences,
            config,
            state: Arc::new(Mutex::new(ViewState::default())),
        }
    }

    /// Current rows, notice and theme.
    pub async fn snapshot(&self) -> ViewSnapshot {
        let state = self.state.lock().await;
        ViewSnapshot {
            rows: state.rows.clone(),
            notice: state.notice.clone(),
            theme: self.preferences.theme().await,
        }
    }

    /// Current file rows.
    pub async fn rows(&self) -> Vec<FileRow> {
        self.state.lock().await.rows.clone()
    }

    /// Pending notice, if any.
    pub async fn notice(&self) -> Option<Notice> {
        self.state.lock().await.notice.clone()
    }

    /// Clear the pending notice.
    pub async fn dismiss_notice(&self) {
        self.state.lock().await.notice = None;
    }

    /// Re-read the full file list.
    pub async fn refresh(&self) -> AppResult<()> {
        let mut state = self.state.lock().await;
        let result = self.reload(&mut state).await;
        record(&mut state, "refresh", result)
    }

    /// Store a selected file, then re-read the list.
    pub async fn upload(&self, upload: FileUpload) -> AppResult<StoreReceipt> {
        let mut state = self.state.lock().await;
        let result = async {
            if upload.size() > self.config.max_upload_size_bytes {
                return Err(AppError::validation(format!(
                    "{} is larger than the {} byte upload limit",
                    upload.name, self.config.max_upload_size_bytes
                )));
            }
            let receipt = self.files.store(upload).await?;
            self.reload(&mut state).await?;
            Ok::<_, AppError>(receipt)
        }
        .await;
        record(&mut state, "upload", result)
    }

    /// Open a file in the viewing context, falling back to a download.
    pub async fn open(&self, id: &str) -> AppResult<OpenOutcome> {
        let mut state = self.state.lock().await;
        let result = self.opener.open(id).await;
        record(&mut state, "open", result)
    }

    /// Delete a file, then re-read the list.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let mut state = self.state.lock().await;
        let result = async {
            self.files.delete(id).await?;
            self.reload(&mut state).await
        }
        .await;
        record(&mut state, "delete", result)
    }

    /// Switch between light and dark theme.
    pub async fn toggle_theme(&self) -> AppResult<Theme> {
        let mut state = self.state.lock().await;
        let result = self.preferences.toggle_theme().await;
        record(&mut state, "toggle_theme", result)
    }

    async fn reload(&self, state: &mut ViewState) -> AppResult<()> {
        let mut rows: Vec<FileRow> = self
            .files
            .list_all()
            .await?
            .iter()
            .map(FileRow::from)
            .collect();
        rows.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then_with(|| a.name.cmp(&b.name)));
        debug!(count = rows.len(), "View refreshed");
        state.rows = rows;
        Ok(())
    }
}

/// Turn a failed action into a notice, passing the result through.
fn record<T>(state: &mut ViewState, action: &str, result: AppResult<T>) -> AppResult<T> {
    if let Err(e) = &result {
        warn!(action, error = %e, "View action failed");
        state.notice = Some(Notice::from(e));
    }
    result
}

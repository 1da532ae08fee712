//! Integration tests for opening files through transient object URLs.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use filevault::vault_core::result::AppResult;
use filevault::vault_service::file::{ObjectBlob, ObjectUrl, OpenAction, ViewingContext};

use crate::helpers::{self, TestVault};

/// Viewer that accepts PDFs only and remembers what it was shown.
#[derive(Debug, Default)]
struct PdfViewer {
    shown: Mutex<Vec<(ObjectUrl, ObjectBlob)>>,
    downloaded: Mutex<Vec<String>>,
}

#[async_trait]
impl ViewingContext for PdfViewer {
    async fn open(&self, url: &ObjectUrl, blob: &ObjectBlob) -> AppResult<bool> {
        if blob.mime_type != "application/pdf" {
            return Ok(false);
        }
        self.shown.lock().unwrap().push((url.clone(), blob.clone()));
        Ok(true)
    }

    async fn download(&self, _url: &ObjectUrl, _blob: &ObjectBlob, file_name: &str) -> AppResult<()> {
        self.downloaded.lock().unwrap().push(file_name.to_string());
        Ok(())
    }
}

#[tokio::test]
async fn test_open_views_or_downloads() {
    let viewer = Arc::new(PdfViewer::default());
    let app = TestVault::with_context(viewer.clone()).await;
    let view = &app.vault.view;

    let pdf = view
        .upload(filevault::vault_entity::file::FileUpload::new(
            "paper.pdf",
            "application/pdf",
            b"%PDF-1.7".to_vec(),
        ))
        .await
        .unwrap();
    let txt = view.upload(helpers::upload("notes.txt", b"notes")).await.unwrap();

    let opened = view.open(pdf.id()).await.unwrap();
    assert_eq!(opened.action, OpenAction::Viewed);
    assert_eq!(viewer.shown.lock().unwrap()[0].1.data.as_ref(), b"%PDF-1.7");

    let saved = view.open(txt.id()).await.unwrap();
    assert_eq!(saved.action, OpenAction::Downloaded);
    assert_eq!(*viewer.downloaded.lock().unwrap(), vec!["notes.txt"]);
}

#[tokio::test]
async fn test_default_context_writes_download_dir() {
    let app = TestVault::new().await;
    let view = &app.vault.view;
    let receipt = view.upload(helpers::upload("report.txt", b"contents")).await.unwrap();

    let outcome = view.open(receipt.id()).await.unwrap();
    assert_eq!(outcome.action, OpenAction::Downloaded);

    let saved = app.dir.path().join("downloads").join("report.txt");
    assert_eq!(std::fs::read(saved).unwrap(), b"contents");

    view.open(receipt.id()).await.unwrap();
    let again = app.dir.path().join("downloads").join("report (1).txt");
    assert!(again.exists());
}

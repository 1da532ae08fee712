//! Integration tests for storing, listing and deleting files.

use bytes::Bytes;

use filevault::vault_core::error::ErrorKind;
use filevault::vault_entity::file::FingerprintMode;

use crate::helpers::{self, TestVault};

#[tokio::test]
async fn test_store_list_delete_scenario() {
    let app = TestVault::new().await;
    let files = &app.vault.files;

    let receipt = files
        .store(helpers::upload("test.txt", b"0123456789"))
        .await
        .unwrap();

    let listed = files.list_all().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "test.txt");
    assert_eq!(listed[0].size, 10);
    assert_eq!(listed[0].data, Bytes::from_static(b"0123456789"));

    files.delete(receipt.id()).await.unwrap();
    assert!(files.list_all().await.unwrap().is_empty());
    assert!(files.get(receipt.id()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_different_content_gets_distinct_ids() {
    let app = TestVault::new().await;
    let files = &app.vault.files;

    let a = files.store(helpers::upload("a.txt", b"first")).await.unwrap();
    let b = files.store(helpers::upload("b.txt", b"second")).await.unwrap();

    assert_ne!(a.id(), b.id());
    let mut ids: Vec<String> = files
        .list_all()
        .await
        .unwrap()
        .into_iter()
        .map(|f| f.id)
        .collect();
    ids.sort();
    let mut expected = vec![a.id().to_string(), b.id().to_string()];
    expected.sort();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn test_same_content_is_deduplicated() {
    let app = TestVault::new().await;
    let files = &app.vault.files;

    let first = files.store(helpers::upload("a.txt", b"dup")).await.unwrap();
    let second = files.store(helpers::upload("a.txt", b"dup")).await.unwrap();

    assert_eq!(first.mode, FingerprintMode::ContentAddressed);
    assert_eq!(first.id(), second.id());
    assert_eq!(files.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_without_digest_same_content_is_not_deduplicated() {
    let app = TestVault::with_config(|config| {
        config.storage.fingerprint.algorithm = "none".to_string();
    })
    .await;
    let files = &app.vault.files;

    let first = files.store(helpers::upload("a.txt", b"dup")).await.unwrap();
    let second = files.store(helpers::upload("a.txt", b"dup")).await.unwrap();

    assert_eq!(first.mode, FingerprintMode::Random);
    assert_ne!(first.id(), second.id());
    assert_eq!(files.count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_delete_unknown_id_is_noop() {
    let app = TestVault::new().await;
    let files = &app.vault.files;
    files.store(helpers::upload("a.txt", b"keep")).await.unwrap();

    files.delete("0000").await.unwrap();
    assert_eq!(files.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_files_survive_reopen() {
    let app = TestVault::new().await;
    let receipt = app
        .vault
        .files
        .store(helpers::upload("kept.txt", b"persisted"))
        .await
        .unwrap();

    let reopened = app.reopen().await;
    let file = reopened.files.get(receipt.id()).await.unwrap().unwrap();
    assert_eq!(file, receipt.file);
    assert_eq!(reopened.view.rows().await.len(), 1);
}

#[tokio::test]
async fn test_memory_quota_surfaces_as_notice() {
    let app = TestVault::with_config(|config| {
        config.storage.provider = "memory".to_string();
        config.storage.memory.quota_bytes = Some(32);
    })
    .await;

    let err = app
        .vault
        .view
        .upload(helpers::upload("big.txt", &[7u8; 64]))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::QuotaExceeded);
    assert_eq!(
        app.vault.view.notice().await.map(|n| n.kind),
        Some(ErrorKind::QuotaExceeded)
    );
    assert!(app.vault.view.rows().await.is_empty());
}

#[tokio::test]
async fn test_view_upload_and_delete() {
    let app = TestVault::new().await;
    let view = &app.vault.view;

    let receipt = view.upload(helpers::upload("test.txt", b"0123456789")).await.unwrap();
    let rows = view.rows().await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "test.txt");
    assert_eq!(rows[0].size_label, "10 B");

    view.delete(receipt.id()).await.unwrap();
    assert!(view.rows().await.is_empty());
}

#[tokio::test]
async fn test_ids_outside_key_alphabet_are_absent() {
    let app = TestVault::new().await;
    let files = &app.vault.files;
    files.store(helpers::upload("a.txt", b"keep")).await.unwrap();

    assert!(files.get("a.b").await.unwrap().is_none());
    files.delete("a.b").await.unwrap();
    assert_eq!(files.count().await.unwrap(), 1);

    let err = app.vault.view.open("a.b").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

//! Integration tests for the persisted theme preference.

use filevault::vault_entity::preference::Theme;
use filevault::vault_service::preference::ThemeSource;

use crate::helpers::TestVault;

#[tokio::test]
async fn test_theme_starts_from_system_probe() {
    let app = TestVault::with_config(|config| {
        config.preferences.system_theme = Some("dark".to_string());
    })
    .await;

    let settings = app.vault.preferences.settings().await;
    assert_eq!(settings.theme, Theme::Dark);
    assert_eq!(settings.source, ThemeSource::System);
}

#[tokio::test]
async fn test_toggled_theme_survives_reopen() {
    let app = TestVault::new().await;
    assert_eq!(app.vault.view.snapshot().await.theme, Theme::Light);

    assert_eq!(app.vault.view.toggle_theme().await.unwrap(), Theme::Dark);

    let reopened = app.reopen().await;
    let settings = reopened.preferences.settings().await;
    assert_eq!(settings.theme, Theme::Dark);
    assert_eq!(settings.source, ThemeSource::Stored);
}

#[tokio::test]
async fn test_theme_lives_outside_file_collection() {
    let app = TestVault::new().await;
    app.vault.view.toggle_theme().await.unwrap();
    assert_eq!(app.vault.files.count().await.unwrap(), 0);
}

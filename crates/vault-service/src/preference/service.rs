//! Theme preference: loaded once at startup, updated and persisted together.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use vault_core::config::PreferenceConfig;
use vault_core::result::AppResult;
use vault_core::traits::preference::PreferenceStore;
use vault_entity::preference::Theme;

use super::probe::SystemThemeProbe;

/// Where the active theme came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeSource {
    /// Read from the preference slot.
    Stored,
    /// Reported by the system probe.
    System,
    /// Neither was available.
    Default,
}

/// The theme settings handed to the view layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeSettings {
    /// Active theme.
    pub theme: Theme,
    /// Where it came from.
    pub source: ThemeSource,
}

/// Owns the theme preference.
///
/// All reads go through the in-memory [`ThemeSettings`]; every update
/// persists the new value before the in-memory copy changes, so a failed
/// write leaves both sides on the old theme.
#[derive(Debug, Clone)]
pub struct PreferenceService {
    store: Arc<dyn PreferenceStore>,
    theme_key: String,
    settings: Arc<RwLock<ThemeSettings>>,
}

impl PreferenceService {
    /// Resolve the startup theme: the stored slot, else the system probe,
    /// else light.
    pub async fn load(
        store: Arc<dyn PreferenceStore>,
        config: &PreferenceConfig,
        probe: &dyn SystemThemeProbe,
    ) -> AppResult<Self> {
        let stored = match store.get(&config.theme_key).await? {
            Some(raw) => match raw.parse::<Theme>() {
                Ok(theme) => Some(theme),
                Err(e) => {
                    warn!(key = %config.theme_key, value = %raw, error = %e, "Ignoring stored theme");
                    None
                }
            },
            None => None,
        };

        let settings = match (stored, probe.preferred_theme()) {
            (Some(theme), _) => ThemeSettings {
                theme,
                source: ThemeSource::Stored,
            },
            (None, Some(theme)) => ThemeSettings {
                theme,
                source: ThemeSource::System,
            },
            (None, None) => ThemeSettings {
                theme: Theme::default(),
                source: ThemeSource::Default,
            },
        };

        info!(theme = %settings.theme, source = ?settings.source, "Theme loaded");

        Ok(Self {
            store,
            theme_key: config.theme_key.clone(),
            settings: Arc::new(RwLock::new(settings)),
        })
    }

    /// Current settings.
    pub async fn settings(&self) -> ThemeSettings {
        *self.settings.read().await
    }

    /// Current theme.
    pub async fn theme(&self) -> Theme {
        self.settings.read().await.theme
    }

    /// Persist and apply `theme`.
    pub async fn set_theme(&self, theme: Theme) -> AppResult<Theme> {
        let mut settings = self.settings.write().await;
        self.store.set(&self.theme_key, theme.as_str()).await?;
        *settings = ThemeSettings {
            theme,
            source: ThemeSource::Stored,
        };
        info!(theme = %theme, "Theme updated");
        Ok(theme)
    }

    /// Switch between light and dark, persisting the result.
    pub async fn toggle_theme(&self) -> AppResult<Theme> {
        let next = self.theme().await.toggled();
        self.set_theme(next).await
    }
}

//! Preference slot configuration.

use serde::{Deserialize, Serialize};

/// Where user preferences (currently only the theme) are persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferenceConfig {
    /// Preference provider: `"file"` or `"memory"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Path of the JSON file backing the `"file"` provider.
    #[serde(default = "default_path")]
    pub path: String,
    /// Slot name the theme is stored under.
    #[serde(default = "default_theme_key")]
    pub theme_key: String,
    /// System theme reported to the startup probe (`"light"` or `"dark"`).
    /// When unset the probe consults `VAULT_SYSTEM_THEME`.
    #[serde(default)]
    pub system_theme: Option<String>,
}

impl Default for PreferenceConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            path: default_path(),
            theme_key: default_theme_key(),
            system_theme: None,
        }
    }
}

fn default_provider() -> String {
    "file".to_string()
}

fn default_path() -> String {
    "./data/preferences.json".to_string()
}

fn default_theme_key() -> String {
    "theme".to_string()
}

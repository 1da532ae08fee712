//! System colour-scheme probes consulted when no theme has been saved.

use vault_entity::preference::Theme;

/// Environment variable consulted by [`ConfiguredThemeProbe`].
pub const SYSTEM_THEME_ENV: &str = "VAULT_SYSTEM_THEME";

/// Reports the host's preferred colour scheme, if it has one.
pub trait SystemThemeProbe: Send + Sync + std::fmt::Debug {
    /// The preferred theme, or `None` when the host expresses no preference.
    fn preferred_theme(&self) -> Option<Theme>;
}

/// Probe backed by configuration, then the `VAULT_SYSTEM_THEME`
/// environment variable.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredThemeProbe {
    configured: Option<String>,
}

impl ConfiguredThemeProbe {
    /// Create a probe from the configured system theme.
    pub fn new(configured: Option<String>) -> Self {
        Self { configured }
    }
}

impl SystemThemeProbe for ConfiguredThemeProbe {
    fn preferred_theme(&self) -> Option<Theme> {
        self.configured
            .clone()
            .or_else(|| std::env::var(SYSTEM_THEME_ENV).ok())
            .and_then(|raw| raw.parse().ok())
    }
}

/// Probe that always reports the same answer.
#[derive(Debug, Clone, Copy)]
pub struct FixedThemeProbe(pub Option<Theme>);

impl SystemThemeProbe for FixedThemeProbe {
    fn preferred_theme(&self) -> Option<Theme> {
        self.0
    }
}

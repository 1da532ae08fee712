//! User preference services.

pub mod probe;
pub mod service;

pub use probe::{ConfiguredThemeProbe, FixedThemeProbe, SystemThemeProbe};
pub use service::{PreferenceService, ThemeSettings, ThemeSource};

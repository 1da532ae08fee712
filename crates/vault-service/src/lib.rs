//! # vault-service
//!
//! Business logic service layer for FileVault. The [`FileStorageService`]
//! owns content-addressed persistence; [`OpenService`] turns stored records
//! into transient object references for viewing or download;
//! [`PreferenceService`] holds the theme; [`VaultView`] is the headless
//! view-model that wires user actions to all three.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod file;
pub mod preference;
pub mod view;

pub use file::{
    DownloadDirectory, FileStorageService, ObjectBlob, ObjectUrl, ObjectUrlRegistry, OpenAction,
    OpenOutcome, OpenService, ViewingContext,
};
pub use preference::{
    ConfiguredThemeProbe, FixedThemeProbe, PreferenceService, SystemThemeProbe, ThemeSettings,
    ThemeSource,
};
pub use view::{FileRow, Notice, VaultView, ViewSnapshot};

//! File services: content-addressed storage, transient object references,
//! and the open/download flow.

pub mod download;
pub mod object_url;
pub mod open;
pub mod service;
pub mod upload;

pub use download::DownloadDirectory;
pub use object_url::{ObjectBlob, ObjectUrl, ObjectUrlRegistry};
pub use open::{OpenAction, OpenOutcome, OpenService, ViewingContext};
pub use service::FileStorageService;
pub use upload::{mime_from_name, upload_from_path};

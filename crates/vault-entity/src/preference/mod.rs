//! User preference entities.

pub mod theme;

pub use theme::Theme;

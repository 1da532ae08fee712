//! Integration tests for FileVault.

mod helpers;

mod file_test;
mod open_test;
mod preference_test;

//! Shared fixtures for mentorlens tests.

pub mod fixtures;

/// A scratch directory removed when dropped.
pub fn temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

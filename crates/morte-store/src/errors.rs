//! Error handling for morte-store
//!
//! Wraps morte-core ExError with store-specific helpers

use morte_core::errors::{ExError, ExErrorKind};
use std::path::Path;

pub use morte_core::errors::io_error;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a manifest-missing error
pub fn manifest_missing(path: &Path) -> ExError {
    ExError::new(ExErrorKind::ManifestMissing)
        .with_op("manifest_load")
        .with_path(path)
        .with_message("manifest file does not exist")
}

/// Create an error for an output path that would escape the reference tree
pub fn invalid_output_path(path: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("store_open")
        .with_path(path)
        .with_message("output paths must be relative and stay below their root")
}

//! Error handling for rolesync-store
//!
//! Wraps rolesync-core ExError with filesystem-boundary helpers

use rolesync_core::errors::{ExError, ExErrorKind};
use std::path::Path;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create an IO error
pub fn io_error(operation: &str, path: &Path, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_path(path.display().to_string())
        .with_message(err.to_string())
}

/// Create a fatal input error: a declared input is absent or unusable
pub fn fatal_input(operation: &str, path: &Path, reason: &str) -> ExError {
    ExError::new(ExErrorKind::FatalInput)
        .with_op(operation.to_string())
        .with_path(path.display().to_string())
        .with_message(reason.to_string())
}

/// Create a configuration error
pub fn config_error(path: Option<&Path>, reason: &str) -> ExError {
    let err = ExError::new(ExErrorKind::Config)
        .with_op("load_config")
        .with_message(reason.to_string());
    match path {
        Some(path) => err.with_path(path.display().to_string()),
        None => err,
    }
}

/// Create a serialization error from serde_json::Error
pub fn from_serde_json(operation: &str, err: serde_json::Error) -> ExError {
    ExError::new(ExErrorKind::Serialization)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

/// Fail with FatalInput unless `path` exists
pub fn require_exists(operation: &str, path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(fatal_input(operation, path, "declared input does not exist"))
    }
}

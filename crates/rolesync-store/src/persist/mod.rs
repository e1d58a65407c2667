//! Output persistence
//!
//! Every artifact rolesync writes (manifest, reports, merged catalogs) is
//! pretty JSON with two-space indentation and non-ASCII text kept as-is.

pub mod atomic;

pub use atomic::atomic_write;

use crate::errors::{from_serde_json, Result};
use serde::Serialize;
use std::path::Path;

/// Serialize `value` as pretty JSON and write it atomically to `path`.
///
/// # Errors
///
/// `Serialization` when `value` cannot be encoded, `Io` when writing fails.
pub fn write_json_pretty<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).map_err(|e| from_serde_json("write_json", e))?;
    atomic_write(path, text.as_bytes())
}

//! Atomic file replacement
//!
//! Content goes to a sibling `<name>.tmp` first and is renamed over the
//! target, so readers never observe a half-written report or manifest.

use crate::errors::{io_error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Sibling temp path for `target` (`manifest.json` → `manifest.json.tmp`).
pub fn temp_path_for(target: &Path) -> PathBuf {
    let mut name = target
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    target.with_file_name(name)
}

/// Atomically replace `target` with `content`, creating parent directories.
///
/// # Errors
///
/// `Io` when the directory, temp file or rename fails. A failed rename
/// removes the temp file and leaves any existing target untouched.
pub fn atomic_write(target: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| io_error("create_output_dir", parent, e))?;
    }

    let temp = temp_path_for(target);
    fs::write(&temp, content).map_err(|e| io_error("write_temp", &temp, e))?;

    if let Err(e) = fs::rename(&temp, target) {
        let _ = fs::remove_file(&temp);
        return Err(io_error("rename_temp", target, e));
    }

    tracing::debug!(path = %target.display(), bytes = content.len() as u64, "wrote file");
    Ok(())
}

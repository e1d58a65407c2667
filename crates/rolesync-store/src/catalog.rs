//! Catalog, text-source and mapping inputs.
//!
//! All of these are run-level inputs: a missing file aborts the run with
//! `FatalInput` because no partial report would mean anything.

use crate::errors::{fatal_input, io_error, require_exists, Result};
use crate::persist::write_json_pretty;
use rolesync_core::errors::ExError;
use rolesync_core::extract::Dataset;
use rolesync_core::mapping::IdentifierMapping;
use rolesync_core::{log_op_end, log_op_error, log_op_start};
use std::fs;
use std::path::Path;

/// Read a whole text source.
///
/// # Errors
///
/// `FatalInput` when the file does not exist, `Io` when it cannot be read.
pub fn read_text_source(path: &Path) -> Result<String> {
    require_exists("read_text_source", path)?;
    fs::read_to_string(path).map_err(|e| io_error("read_text_source", path, e))
}

/// Load a catalog: a JSON array of record objects.
///
/// Records keep file order. Empty or duplicate ids are not rejected here.
///
/// # Errors
///
/// `FatalInput` when the file is missing or is not a JSON array.
pub fn load_catalog(path: &Path) -> Result<Dataset> {
    log_op_start!("load_catalog", path = %path.display());
    let start = std::time::Instant::now();

    let result = read_text_source(path).and_then(|text| {
        serde_json::from_str::<Dataset>(&text).map_err(|e| {
            fatal_input(
                "load_catalog",
                path,
                &format!("not a JSON array of records: {}", e),
            )
        })
    });

    match &result {
        Ok(dataset) => {
            log_op_end!(
                "load_catalog",
                duration_ms = start.elapsed().as_millis() as u64,
                record_count = dataset.len() as u64
            );
        }
        Err(err) => {
            log_op_error!(
                "load_catalog",
                err.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
        }
    }
    result
}

/// Write a catalog as pretty JSON, atomically.
///
/// # Errors
///
/// `Io` or `Serialization` on failure.
pub fn save_catalog(path: &Path, dataset: &Dataset) -> Result<()> {
    write_json_pretty(path, dataset)?;
    tracing::info!(path = %path.display(), record_count = dataset.len() as u64, "saved catalog");
    Ok(())
}

/// Read and parse the forward section named `marker` of a mapping file.
///
/// # Errors
///
/// `FatalInput` when the file is missing; `ParseFailure` or
/// `AmbiguousBlock` when the section is absent or unbalanced.
pub fn load_mapping(path: &Path, marker: &str) -> Result<IdentifierMapping> {
    let text = read_text_source(path)?;
    let mapping = IdentifierMapping::parse(&text, marker)
        .map_err(|e| ExError::from(e).with_path(path.display().to_string()))?;
    tracing::info!(
        path = %path.display(),
        entry_count = mapping.len() as u64,
        "loaded identifier mapping"
    );
    Ok(mapping)
}

//! Document-tree walk that drives the manifest builder.
//!
//! Traversal order is fixed so two builds over the same tree yield the same
//! entries in the same order:
//!
//! 1. first-level subdirectories of the document root, sorted by name
//!    (loose files at the root are ignored);
//! 2. inside each, a depth-first walk where every level lists its
//!    subdirectories before its files, each group sorted by name;
//! 3. only `*.json` files count as documents.
//!
//! An unreadable or unparseable document is logged and treated as `{}`.

use crate::config::ManifestConfig;
use crate::errors::{fatal_input, io_error, Result};
use crate::persist::write_json_pretty;
use rolesync_core::errors::RoleSyncError;
use rolesync_core::manifest::{entry_from_document, Category, DocumentLocation, Manifest, ManifestEntry};
use rolesync_core::{log_item_skip, log_op_end, log_op_error, log_op_start};
use serde_json::Value;
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

const DOCUMENT_EXTENSION: &str = "json";

/// Build the manifest described by `config`.
///
/// The configured output file is never listed as a document.
///
/// # Errors
///
/// `FatalInput` when the document root is missing or not under the public
/// root; `Io` when the root itself cannot be listed.
pub fn build_manifest(config: &ManifestConfig) -> Result<Manifest> {
    log_op_start!("build_manifest", path = %config.json_root.display());
    let start = std::time::Instant::now();

    let result = config.validate().and_then(|()| {
        collect_entries(
            &config.json_root,
            &config.public_root,
            &config.unknown_author,
            Some(config.output.as_path()),
        )
    });

    match result {
        Ok(entries) => {
            log_op_end!(
                "build_manifest",
                duration_ms = start.elapsed().as_millis() as u64,
                entry_count = entries.len() as u64
            );
            Ok(Manifest::new(entries))
        }
        Err(err) => {
            log_op_error!(
                "build_manifest",
                err.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            Err(err)
        }
    }
}

/// Write a manifest as pretty JSON, atomically.
///
/// # Errors
///
/// `Io` or `Serialization` on failure.
pub fn write_manifest(path: &Path, manifest: &Manifest) -> Result<()> {
    write_json_pretty(path, manifest)?;
    tracing::info!(
        path = %path.display(),
        entry_count = manifest.scripts.len() as u64,
        "wrote manifest"
    );
    Ok(())
}

/// Entries for every document under `json_root`, in traversal order.
///
/// # Errors
///
/// See [`build_manifest`].
pub fn collect_entries(
    json_root: &Path,
    public_root: &Path,
    unknown_author: &str,
    exclude: Option<&Path>,
) -> Result<Vec<ManifestEntry>> {
    if !json_root.is_dir() {
        return Err(fatal_input(
            "collect_entries",
            json_root,
            "document root does not exist or is not a directory",
        ));
    }

    let mut entries = Vec::new();
    for category_dir in category_dirs(json_root)? {
        let dir_name = category_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let category = Category::from_dir_name(&dir_name);
        tracing::debug!(category = %category, dir = %dir_name, "walking category");

        for path in documents_under(&category_dir) {
            if exclude.is_some_and(|excluded| excluded == path.as_path()) {
                continue;
            }
            let Some(location) = locate(&path, category, json_root, public_root) else {
                tracing::warn!(path = %path.display(), "skipping document outside the public root");
                continue;
            };
            let document = read_json_safely(&path);
            entries.push(entry_from_document(&document, &location, unknown_author));
        }
    }
    Ok(entries)
}

/// First-level subdirectories, sorted by name.
fn category_dirs(json_root: &Path) -> Result<Vec<PathBuf>> {
    let listing = fs::read_dir(json_root).map_err(|e| io_error("list_categories", json_root, e))?;
    let mut dirs: Vec<PathBuf> = listing
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    dirs.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(dirs)
}

/// Directories before files, then by name.
fn dirs_first(a: &DirEntry, b: &DirEntry) -> Ordering {
    b.file_type()
        .is_dir()
        .cmp(&a.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}

fn documents_under(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .min_depth(1)
        .sort_by(dirs_first)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable tree entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(DirEntry::into_path)
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext == DOCUMENT_EXTENSION)
        })
        .collect()
}

fn path_segments(path: &Path) -> Vec<String> {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect()
}

fn locate(
    path: &Path,
    category: Category,
    json_root: &Path,
    public_root: &Path,
) -> Option<DocumentLocation> {
    let public_relative = path.strip_prefix(public_root).ok()?;
    let dir_relative = path.parent()?.strip_prefix(json_root).ok()?;
    Some(DocumentLocation {
        category,
        file: path.file_name()?.to_string_lossy().into_owned(),
        stem: path.file_stem()?.to_string_lossy().into_owned(),
        public_segments: path_segments(public_relative),
        dir_segments: path_segments(dir_relative),
    })
}

/// Read and parse one document.
///
/// # Errors
///
/// `InvalidDocument` when the file cannot be read or is not JSON.
pub fn read_document(path: &Path) -> std::result::Result<Value, RoleSyncError> {
    let invalid = |reason: String| RoleSyncError::InvalidDocument {
        path: path.display().to_string(),
        reason,
    };
    let text = fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
    serde_json::from_str(&text).map_err(|e| invalid(e.to_string()))
}

/// Parse a document, falling back to an empty object on any failure.
pub fn read_json_safely(path: &Path) -> Value {
    match read_document(path) {
        Ok(value) => value,
        Err(err) => {
            log_item_skip!("read_document", err);
            Value::Object(serde_json::Map::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rolesync_core::errors::ExError;
    use tempfile::TempDir;

    #[test]
    fn test_dirs_before_files_each_sorted() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("b_dir")).unwrap();
        fs::create_dir_all(root.join("a_dir")).unwrap();
        fs::write(root.join("a_file.json"), "{}").unwrap();
        fs::write(root.join("b_dir/x.json"), "{}").unwrap();
        fs::write(root.join("a_dir/y.json"), "{}").unwrap();
        fs::write(root.join("a_dir/notes.txt"), "").unwrap();

        let names: Vec<String> = documents_under(root)
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();

        assert_eq!(names, vec!["a_dir/y.json", "b_dir/x.json", "a_file.json"]);
    }

    #[test]
    fn test_read_document_reports_invalid_document() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let err = read_document(&path).unwrap_err();
        assert!(matches!(err, RoleSyncError::InvalidDocument { .. }));
        let ex = ExError::from(err);
        assert_eq!(ex.code(), "ERR_PARSE_FAILURE");
        assert_eq!(ex.path(), Some(path.display().to_string().as_str()));
    }

    #[test]
    fn test_read_json_safely_falls_back() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(read_json_safely(&path), serde_json::json!({}));
        assert_eq!(
            read_json_safely(&temp_dir.path().join("absent.json")),
            serde_json::json!({})
        );
    }
}

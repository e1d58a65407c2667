//! Run configuration
//!
//! Every path the tools touch is supplied here rather than compiled in.
//! Loaded from TOML; absent sections and keys take the defaults below.
//!
//! ```toml
//! [catalog]
//! source_catalog = "src/data/roles.json"
//! source_text = "src/data/characters.ts"
//! mapping_text = "src/data/characterIdMapping.ts"
//! mapping_marker = "CN_TO_EN_ID_MAP"
//!
//! [manifest]
//! public_root = "public"
//! json_root = "public/scripts/json"
//! output = "public/scripts/json/manifest.json"
//! unknown_author = "未知"
//! ```

use crate::errors::{config_error, fatal_input, Result};
use rolesync_core::mapping::DEFAULT_FORWARD_MARKER;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Inputs of the catalog reconciliation tools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    /// Target-locale catalog (JSON array of records)
    pub source_catalog: PathBuf,
    /// Source-locale structured text
    pub source_text: PathBuf,
    /// Mapping declaration text
    pub mapping_text: PathBuf,
    /// Marker naming the forward mapping section
    pub mapping_marker: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            source_catalog: PathBuf::from("src/data/roles.json"),
            source_text: PathBuf::from("src/data/characters.ts"),
            mapping_text: PathBuf::from("src/data/characterIdMapping.ts"),
            mapping_marker: DEFAULT_FORWARD_MARKER.to_string(),
        }
    }
}

/// Inputs and output of the manifest builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ManifestConfig {
    /// Root that `jsonUrl` values are relative to
    pub public_root: PathBuf,
    /// Document tree root; must lie under `public_root`
    pub json_root: PathBuf,
    pub output: PathBuf,
    /// Author for non-official documents without one
    pub unknown_author: String,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            public_root: PathBuf::from("public"),
            json_root: PathBuf::from("public/scripts/json"),
            output: PathBuf::from("public/scripts/json/manifest.json"),
            unknown_author: "未知".to_string(),
        }
    }
}

impl ManifestConfig {
    /// Check that `json_root` lies under `public_root`.
    ///
    /// # Errors
    ///
    /// `FatalInput` otherwise; no `jsonUrl` could be computed.
    pub fn validate(&self) -> Result<()> {
        if self.json_root.starts_with(&self.public_root) {
            Ok(())
        } else {
            Err(fatal_input(
                "validate_manifest_config",
                &self.json_root,
                &format!(
                    "json_root is not under public_root {}",
                    self.public_root.display()
                ),
            ))
        }
    }
}

/// Complete run configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncConfig {
    pub catalog: CatalogConfig,
    pub manifest: ManifestConfig,
}

impl SyncConfig {
    /// Load from `path`, or defaults when no path is given.
    ///
    /// # Errors
    ///
    /// - `FatalInput` when `path` is given but does not exist
    /// - `Io` when it cannot be read
    /// - `Config` when it is not valid configuration TOML
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            tracing::debug!("no config file given, using defaults");
            return Ok(Self::default());
        };
        if !path.exists() {
            return Err(fatal_input("load_config", path, "config file does not exist"));
        }
        let text = fs::read_to_string(path)
            .map_err(|e| crate::errors::io_error("load_config", path, e))?;
        let config = Self::from_toml_str(&text).map_err(|e| e.with_path(path.display().to_string()))?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse configuration TOML.
    ///
    /// # Errors
    ///
    /// `Config` on syntax errors, unknown keys or wrong value types.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| config_error(None, &e.to_string()))
    }
}

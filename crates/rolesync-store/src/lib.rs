//! rolesync store - filesystem boundary
//!
//! Provides:
//! - TOML run configuration with defaults
//! - Catalog, text-source and mapping loading
//! - The document-tree walk behind the manifest builder
//! - Atomic pretty-JSON persistence for manifests, reports and catalogs

pub mod catalog;
pub mod config;
pub mod errors;
pub mod manifest;
pub mod persist;

// Re-export key types
pub use config::{CatalogConfig, ManifestConfig, SyncConfig};
pub use errors::Result;

//! rolesync core - catalog reconciliation and manifest kernel
//!
//! This crate holds the IO-free parts of rolesync:
//! - Identifier canonicalization shared by every comparison
//! - Typed record extraction from brace-delimited source text
//! - Directional identifier mapping between locales
//! - Cross-locale discrepancy, duplicate and merge checks over datasets
//! - Manifest entry derivation (metadata, stable ids, URLs)
//!
//! Reading files, walking document trees and persisting results belong to
//! `rolesync-store`.

pub mod diff;
pub mod errors;
pub mod extract;
pub mod logging_facility;
pub mod manifest;
pub mod mapping;
pub mod normalize;

#[doc(hidden)]
pub use rolesync_core_types as core_types;
#[doc(hidden)]
pub use tracing;

// Re-export commonly used types
pub use diff::{DiscrepancyReport, DuplicateReport};
pub use errors::{ExError, ExErrorKind, Result, RoleSyncError};
pub use extract::{Dataset, ExtractionFailure, FieldSpec, FieldValue, Record, SourceText};
pub use manifest::{Manifest, ManifestEntry};
pub use mapping::IdentifierMapping;
pub use normalize::canonical;

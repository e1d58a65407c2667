//! Content manifest for a tree of distributable JSON documents.
//!
//! ## Schema Version
//!
//! Current manifest version: **1**
//!
//! ## Manifest Fields
//!
//! - `generatedAt`: UTC ISO-8601 timestamp with microseconds and `Z`
//! - `version`: schema version (currently 1)
//! - `scripts`: entries in traversal order
//!
//! `generatedAt` is the only field that differs between two builds of an
//! unchanged tree.
//!
//! Walking the tree is a filesystem concern and lives in `rolesync-store`;
//! this module derives everything that depends only on a document's content
//! and location.

pub mod entry;
pub mod meta;
pub mod slug;

pub use entry::{entry_from_document, Category, DocumentLocation, ManifestEntry, OFFICIAL_AUTHOR};
pub use meta::extract_meta;
pub use slug::{slugify, stable_id};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Manifest schema version.
pub const MANIFEST_VERSION: u32 = 1;

/// The manifest document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub generated_at: String,
    pub version: u32,
    pub scripts: Vec<ManifestEntry>,
}

impl Manifest {
    /// Wrap entries, stamped with the current time.
    pub fn new(scripts: Vec<ManifestEntry>) -> Self {
        Self::at(Utc::now(), scripts)
    }

    pub fn at(now: DateTime<Utc>, scripts: Vec<ManifestEntry>) -> Self {
        Self {
            generated_at: format_generated_at(now),
            version: MANIFEST_VERSION,
            scripts,
        }
    }
}

/// `2024-05-01T08:30:00.000000Z` form.
pub fn format_generated_at(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Micros, true)
}

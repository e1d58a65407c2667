//! Dataset differ and duplicate detector.
//!
//! Compares extracted datasets across locales and checks a single dataset
//! for id anomalies. Every comparison goes through [`crate::normalize::canonical`].
//!
//! ## Entry points
//!
//! ```
//! use rolesync_core::diff::{find_discrepancies, render_discrepancy_summary};
//! use rolesync_core::extract::{Dataset, Record};
//! use rolesync_core::mapping::IdentifierMapping;
//!
//! let source: Dataset = vec![Record::new("pit_hag")].into();
//! let target: Dataset = vec![Record::new("pithag")].into();
//! let mapping = IdentifierMapping::from_pairs([("pit_hag", "pithag")]);
//!
//! let report = find_discrepancies(&source, &target, &mapping);
//! assert!(report.missing.is_empty());
//! println!("{}", render_discrepancy_summary(&report));
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: identical inputs produce identical reports.
//! - **Order**: discrepancies follow source order; duplicate groups and
//!   one-sided entries are sorted by canonical id.
//! - **Anomalies are values**: empty and duplicate ids are reported, never
//!   raised. Only [`merge_datasets`] rejects them.

pub mod engine;
pub mod human_summary;
pub mod model;

pub use engine::{
    compare_datasets, find_discrepancies, find_duplicates, merge_datasets, team_counts,
    UNKNOWN_TEAM,
};
pub use human_summary::{
    render_comparison_summary, render_discrepancy_summary, render_duplicate_summary,
    render_extraction_failures, render_team_counts,
};
pub use model::{
    DatasetComparison, DiscrepancyEntry, DiscrepancyReport, DuplicateGroup, DuplicateReport,
    EmptyIdAnomaly, MappedPair, Occurrence, OneSidedEntry, TeamCounts,
};

//! Dataset diff output types.
//!
//! All report types implement `Debug, Clone, Serialize, Deserialize, PartialEq`.
//! Ordering is fixed by construction: discrepancy lists follow source order,
//! keyed collections are sorted by canonical id.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A source record with no counterpart in the target after mapping.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DiscrepancyEntry {
    pub source_id: String,
    pub mapped_target_id: String,
    pub name: String,
    pub ability_text: String,
}

/// A source id whose mapped target was found.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MappedPair {
    pub source_id: String,
    pub mapped_target_id: String,
}

/// Result of the cross-dataset diff.
///
/// Both lists preserve the source dataset's order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DiscrepancyReport {
    pub missing: Vec<DiscrepancyEntry>,
    pub mapped_present: Vec<MappedPair>,
}

impl DiscrepancyReport {
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty()
    }
}

/// One appearance of an id inside a dataset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Occurrence {
    pub index: usize,
    pub raw_id: String,
    pub name: String,
}

/// Records sharing one canonical id, in original appearance order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateGroup {
    pub canonical_id: String,
    pub occurrences: Vec<Occurrence>,
}

/// A record without a usable id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmptyIdAnomaly {
    pub index: usize,
}

/// Intra-dataset anomalies.
///
/// `groups` is sorted by ascending canonical id; `empty_ids` keeps
/// original order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateReport {
    pub groups: Vec<DuplicateGroup>,
    pub empty_ids: Vec<EmptyIdAnomaly>,
}

impl DuplicateReport {
    pub fn is_clean(&self) -> bool {
        self.groups.is_empty() && self.empty_ids.is_empty()
    }
}

/// A record present on only one side of a symmetric comparison.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OneSidedEntry {
    pub canonical_id: String,
    pub raw_id: String,
    pub name: String,
    pub team: Option<String>,
}

/// Symmetric comparison of two datasets keyed by canonical id.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DatasetComparison {
    /// Sorted by canonical id
    pub only_in_a: Vec<OneSidedEntry>,
    /// Sorted by canonical id
    pub only_in_b: Vec<OneSidedEntry>,
    pub duplicates_a: DuplicateReport,
    pub duplicates_b: DuplicateReport,
    /// Number of canonical ids present on both sides
    pub shared: usize,
}

impl DatasetComparison {
    pub fn is_clean(&self) -> bool {
        self.only_in_a.is_empty()
            && self.only_in_b.is_empty()
            && self.duplicates_a.is_clean()
            && self.duplicates_b.is_clean()
    }
}

/// Record count per team, sorted by team name.
pub type TeamCounts = BTreeMap<String, usize>;

//! Dataset diff computation.

use crate::diff::model::{
    DatasetComparison, DiscrepancyEntry, DiscrepancyReport, DuplicateGroup, DuplicateReport,
    EmptyIdAnomaly, MappedPair, Occurrence, OneSidedEntry, TeamCounts,
};
use crate::errors::RoleSyncError;
use crate::extract::{Dataset, Record};
use crate::mapping::IdentifierMapping;
use crate::normalize::canonical;
use crate::{log_op_end, log_op_error, log_op_start};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Team label for records without a `team` field.
pub const UNKNOWN_TEAM: &str = "unknown";

/// Source records whose mapped id is absent from the target.
///
/// Each id in `source` is resolved through `mapping`, then looked up by
/// canonical form among the target's ids. Entries keep the source order.
pub fn find_discrepancies(
    source: &Dataset,
    target: &Dataset,
    mapping: &IdentifierMapping,
) -> DiscrepancyReport {
    log_op_start!("find_discrepancies", record_count = source.len() as u64);
    let start = std::time::Instant::now();

    let target_ids: HashSet<String> = target
        .iter()
        .filter(|r| r.has_id())
        .map(|r| canonical(&r.id))
        .collect();

    let mut report = DiscrepancyReport::default();
    for record in source {
        let mapped = mapping.resolve(&record.id);
        if target_ids.contains(&canonical(&mapped)) {
            report.mapped_present.push(MappedPair {
                source_id: record.id.clone(),
                mapped_target_id: mapped,
            });
        } else {
            report.missing.push(DiscrepancyEntry {
                source_id: record.id.clone(),
                mapped_target_id: mapped,
                name: record.name().to_string(),
                ability_text: record.ability().to_string(),
            });
        }
    }

    log_op_end!(
        "find_discrepancies",
        duration_ms = start.elapsed().as_millis() as u64,
        missing_count = report.missing.len() as u64
    );
    report
}

/// Duplicate canonical ids and empty ids within one dataset.
pub fn find_duplicates(dataset: &Dataset) -> DuplicateReport {
    let mut by_canonical: BTreeMap<String, Vec<Occurrence>> = BTreeMap::new();
    let mut empty_ids = Vec::new();

    for (index, record) in dataset.iter().enumerate() {
        if !record.has_id() {
            empty_ids.push(EmptyIdAnomaly { index });
            continue;
        }
        by_canonical
            .entry(canonical(&record.id))
            .or_default()
            .push(Occurrence {
                index,
                raw_id: record.id.clone(),
                name: record.name().to_string(),
            });
    }

    let groups = by_canonical
        .into_iter()
        .filter(|(_, occurrences)| occurrences.len() > 1)
        .map(|(canonical_id, occurrences)| DuplicateGroup {
            canonical_id,
            occurrences,
        })
        .collect::<Vec<_>>();

    if !groups.is_empty() || !empty_ids.is_empty() {
        tracing::warn!(
            duplicate_groups = groups.len() as u64,
            empty_ids = empty_ids.len() as u64,
            "dataset has id anomalies"
        );
    }

    DuplicateReport { groups, empty_ids }
}

/// Symmetric comparison keyed by canonical id.
///
/// No mapping is applied; both datasets are expected to share an id space.
pub fn compare_datasets(a: &Dataset, b: &Dataset) -> DatasetComparison {
    log_op_start!("compare_datasets");
    let start = std::time::Instant::now();

    let side_a = first_by_canonical(a);
    let side_b = first_by_canonical(b);

    let comparison = DatasetComparison {
        only_in_a: one_sided(&side_a, &side_b),
        only_in_b: one_sided(&side_b, &side_a),
        duplicates_a: find_duplicates(a),
        duplicates_b: find_duplicates(b),
        shared: side_a.keys().filter(|k| side_b.contains_key(*k)).count(),
    };

    log_op_end!(
        "compare_datasets",
        duration_ms = start.elapsed().as_millis() as u64,
        only_in_a = comparison.only_in_a.len() as u64,
        only_in_b = comparison.only_in_b.len() as u64
    );
    comparison
}

fn first_by_canonical(dataset: &Dataset) -> BTreeMap<String, &Record> {
    let mut index = BTreeMap::new();
    for record in dataset.iter().filter(|r| r.has_id()) {
        index.entry(canonical(&record.id)).or_insert(record);
    }
    index
}

fn one_sided(
    side: &BTreeMap<String, &Record>,
    other: &BTreeMap<String, &Record>,
) -> Vec<OneSidedEntry> {
    side.iter()
        .filter(|(key, _)| !other.contains_key(*key))
        .map(|(key, record)| OneSidedEntry {
            canonical_id: key.clone(),
            raw_id: record.id.clone(),
            name: record.name().to_string(),
            team: record.team().map(str::to_string),
        })
        .collect()
}

/// Number of records per team.
pub fn team_counts(dataset: &Dataset) -> TeamCounts {
    let mut counts = TeamCounts::new();
    for record in dataset {
        let team = record.team().unwrap_or(UNKNOWN_TEAM);
        *counts.entry(team.to_string()).or_insert(0) += 1;
    }
    counts
}

/// Append `additions` to `existing`.
///
/// # Errors
///
/// - `EmptyId` when an addition has no id (index into `additions`)
/// - `DuplicateIds` listing every canonical id that collides with
///   `existing` or repeats inside `additions`
///
/// Nothing is merged when either check fails.
pub fn merge_datasets(existing: &Dataset, additions: &Dataset) -> Result<Dataset, RoleSyncError> {
    log_op_start!(
        "merge_datasets",
        record_count = existing.len() as u64,
        entry_count = additions.len() as u64
    );
    let start = std::time::Instant::now();

    let result = check_mergeable(existing, additions).map(|()| {
        existing
            .iter()
            .chain(additions.iter())
            .cloned()
            .collect::<Dataset>()
    });

    match &result {
        Ok(merged) => {
            log_op_end!(
                "merge_datasets",
                duration_ms = start.elapsed().as_millis() as u64,
                record_count = merged.len() as u64
            );
        }
        Err(err) => {
            log_op_error!(
                "merge_datasets",
                err.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
        }
    }
    result
}

fn check_mergeable(existing: &Dataset, additions: &Dataset) -> Result<(), RoleSyncError> {
    if let Some(index) = additions.iter().position(|r| !r.has_id()) {
        return Err(RoleSyncError::EmptyId { index });
    }

    let mut seen: HashSet<String> = existing
        .iter()
        .filter(|r| r.has_id())
        .map(|r| canonical(&r.id))
        .collect();
    let mut collisions = BTreeSet::new();
    for record in additions {
        let key = canonical(&record.id);
        if !seen.insert(key.clone()) {
            collisions.insert(key);
        }
    }

    if collisions.is_empty() {
        Ok(())
    } else {
        Err(RoleSyncError::DuplicateIds {
            canonical_ids: collisions.into_iter().collect(),
        })
    }
}

//! Plain-text summaries of diff reports.
//!
//! Output is deterministic: it only depends on the report, never on the clock
//! or on map iteration order.

use crate::diff::model::{DatasetComparison, DiscrepancyReport, DuplicateReport, TeamCounts};
use crate::extract::{ExtractionFailure, FailureKind};

/// Abilities longer than this are cut in the summary.
const ABILITY_PREVIEW_CHARS: usize = 60;

/// Render a [`DiscrepancyReport`].
pub fn render_discrepancy_summary(report: &DiscrepancyReport) -> String {
    let mut out = format!(
        "Found {} mapped id(s), {} missing from target\n",
        report.mapped_present.len(),
        report.missing.len()
    );

    if report.missing.is_empty() {
        out.push_str("No missing entries.\n");
        return out;
    }

    out.push('\n');
    for (n, entry) in report.missing.iter().enumerate() {
        let arrow = if entry.source_id == entry.mapped_target_id {
            entry.source_id.clone()
        } else {
            format!("{} -> {}", entry.source_id, entry.mapped_target_id)
        };
        out.push_str(&format!("{:>3}. {} ({})\n", n + 1, arrow, entry.name));
        if !entry.ability_text.is_empty() {
            out.push_str(&format!("     {}\n", preview(&entry.ability_text)));
        }
    }
    out
}

/// Render a [`DuplicateReport`].
pub fn render_duplicate_summary(report: &DuplicateReport) -> String {
    let mut out = String::new();

    if report.is_clean() {
        out.push_str("No duplicate or empty ids.\n");
        return out;
    }

    if !report.groups.is_empty() {
        out.push_str(&format!("Duplicate ids ({}):\n", report.groups.len()));
        for group in &report.groups {
            out.push_str(&format!("  {}\n", group.canonical_id));
            for occ in &group.occurrences {
                out.push_str(&format!("    [{}] {} ({})\n", occ.index, occ.raw_id, occ.name));
            }
        }
    }

    if !report.empty_ids.is_empty() {
        let indices = report
            .empty_ids
            .iter()
            .map(|e| e.index.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!("Empty ids at index: {}\n", indices));
    }
    out
}

/// Render a [`DatasetComparison`] with `a_label` / `b_label` naming the sides.
pub fn render_comparison_summary(cmp: &DatasetComparison, a_label: &str, b_label: &str) -> String {
    let mut out = format!("Shared ids: {}\n", cmp.shared);

    for (label, entries) in [(a_label, &cmp.only_in_a), (b_label, &cmp.only_in_b)] {
        out.push_str(&format!("Only in {} ({}):\n", label, entries.len()));
        for entry in entries {
            let team = entry.team.as_deref().unwrap_or("-");
            out.push_str(&format!("  {} ({}, {})\n", entry.raw_id, entry.name, team));
        }
    }

    for (label, dups) in [(a_label, &cmp.duplicates_a), (b_label, &cmp.duplicates_b)] {
        if !dups.is_clean() {
            out.push_str(&format!("Anomalies in {}:\n", label));
            for line in render_duplicate_summary(dups).lines() {
                out.push_str(&format!("  {}\n", line));
            }
        }
    }
    out
}

/// Render team counts, one `team: count` line each.
pub fn render_team_counts(counts: &TeamCounts) -> String {
    let total: usize = counts.values().sum();
    let mut out = format!("Total: {}\n", total);
    for (team, count) in counts {
        out.push_str(&format!("  {}: {}\n", team, count));
    }
    out
}

/// Render the blocks a batch extraction skipped. Empty when nothing failed.
pub fn render_extraction_failures(failures: &[ExtractionFailure]) -> String {
    if failures.is_empty() {
        return String::new();
    }
    let mut out = format!("Skipped {} block(s):\n", failures.len());
    for failure in failures {
        let reason = match failure.kind {
            FailureKind::NotFound => "not found".to_string(),
            FailureKind::Unbalanced { offset } => format!("never closes (offset {})", offset),
        };
        out.push_str(&format!("  {}: {}\n", failure.identifier, reason));
    }
    out
}

fn preview(text: &str) -> String {
    if text.chars().count() <= ABILITY_PREVIEW_CHARS {
        return text.to_string();
    }
    let cut: String = text.chars().take(ABILITY_PREVIEW_CHARS).collect();
    format!("{}...", cut)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::model::{DiscrepancyEntry, DuplicateGroup, EmptyIdAnomaly, Occurrence};

    #[test]
    fn test_discrepancy_summary_lists_missing() {
        let report = DiscrepancyReport {
            missing: vec![DiscrepancyEntry {
                source_id: "pit_hag".into(),
                mapped_target_id: "pithag".into(),
                name: "麻脸巫婆".into(),
                ability_text: "每个夜晚*，你要选择一名玩家和一个角色。".into(),
            }],
            mapped_present: vec![],
        };
        let text = render_discrepancy_summary(&report);
        assert!(text.contains("1 missing"));
        assert!(text.contains("pit_hag -> pithag (麻脸巫婆)"));
    }

    #[test]
    fn test_duplicate_summary_clean_and_dirty() {
        assert_eq!(
            render_duplicate_summary(&DuplicateReport::default()),
            "No duplicate or empty ids.\n"
        );

        let report = DuplicateReport {
            groups: vec![DuplicateGroup {
                canonical_id: "imp".into(),
                occurrences: vec![
                    Occurrence { index: 0, raw_id: "Imp".into(), name: "a".into() },
                    Occurrence { index: 4, raw_id: "imp".into(), name: "b".into() },
                ],
            }],
            empty_ids: vec![EmptyIdAnomaly { index: 2 }],
        };
        let text = render_duplicate_summary(&report);
        assert!(text.contains("[4] imp (b)"));
        assert!(text.contains("Empty ids at index: 2"));
    }

    #[test]
    fn test_extraction_failures_summary() {
        assert_eq!(render_extraction_failures(&[]), "");

        let failures = [
            ExtractionFailure {
                identifier: "spy".into(),
                kind: FailureKind::NotFound,
            },
            ExtractionFailure {
                identifier: "imp".into(),
                kind: FailureKind::Unbalanced { offset: 17 },
            },
        ];
        assert_eq!(
            render_extraction_failures(&failures),
            "Skipped 2 block(s):\n  spy: not found\n  imp: never closes (offset 17)\n"
        );
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        let long = "夜".repeat(ABILITY_PREVIEW_CHARS + 5);
        let cut = preview(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), ABILITY_PREVIEW_CHARS + 3);
    }
}

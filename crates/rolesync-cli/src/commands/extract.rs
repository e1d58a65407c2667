//! Extract command
//!
//! Usage: rolesync extract [--out <PATH>] [--merge]
//!
//! Reads every source role whose mapped id is missing from the catalog.
//! With `--merge` the extracted roles are appended to the catalog in place.

use super::{source_dataset, write_report, CommonArgs};
use clap::Args;
use rolesync_core::diff::{find_discrepancies, merge_datasets, render_extraction_failures};
use rolesync_core::extract::{Dataset, ExtractionFailure};
use rolesync_core::ExError;
use rolesync_store::catalog::{load_catalog, load_mapping, save_catalog};
use serde::Serialize;
use std::collections::HashSet;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExtractArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Source-locale structured text (overrides config)
    #[arg(long)]
    pub source_text: Option<PathBuf>,

    /// Target catalog (overrides config)
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Mapping declaration text (overrides config)
    #[arg(long)]
    pub mapping: Option<PathBuf>,

    /// Append the extracted roles to the catalog
    #[arg(long)]
    pub merge: bool,

    /// Write the extracted roles and skipped blocks here as JSON
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExtractReport<'a> {
    extracted: &'a Dataset,
    extraction_failures: &'a [ExtractionFailure],
}

/// Execute extract command
pub fn execute(args: ExtractArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = args.common.setup()?.catalog;
    let source_text = args.source_text.unwrap_or(config.source_text);
    let catalog_path = args.catalog.unwrap_or(config.source_catalog);
    let mapping_path = args.mapping.unwrap_or(config.mapping_text);

    let batch = source_dataset(&source_text)?;
    let source = &batch.records;
    let catalog = load_catalog(&catalog_path)?;
    let mapping = load_mapping(&mapping_path, &config.mapping_marker)?;

    let report = find_discrepancies(source, &catalog, &mapping);
    let missing: HashSet<&str> = report.missing.iter().map(|e| e.source_id.as_str()).collect();
    let additions: Dataset = source
        .iter()
        .filter(|record| missing.contains(record.id.as_str()))
        .cloned()
        .collect();

    println!("Found {} missing role(s)", additions.len());
    for record in &additions {
        println!("  Extracted: {} ({})", record.id, record.name());
    }
    print!("{}", render_extraction_failures(&batch.failures));
    write_report(
        args.out.as_deref(),
        &ExtractReport {
            extracted: &additions,
            extraction_failures: &batch.failures,
        },
    )?;

    if args.merge {
        let merged = merge_datasets(&catalog, &additions).map_err(ExError::from)?;
        save_catalog(&catalog_path, &merged)?;
        println!(
            "Merged {} role(s) into {} ({} total)",
            additions.len(),
            catalog_path.display(),
            merged.len()
        );
    }
    Ok(())
}

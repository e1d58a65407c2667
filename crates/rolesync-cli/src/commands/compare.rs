//! Compare command
//!
//! Usage: rolesync compare [--symmetric] [--out <PATH>]

use super::{source_dataset, write_report, CommonArgs};
use clap::Args;
use rolesync_core::diff::{
    compare_datasets, find_discrepancies, render_comparison_summary, render_discrepancy_summary,
    render_extraction_failures, DatasetComparison, DiscrepancyReport,
};
use rolesync_core::extract::ExtractionFailure;
use rolesync_store::catalog::{load_catalog, load_mapping};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct CompareArgs {
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

    /// Also list canonical ids present on only one side
    #[arg(long)]
    pub symmetric: bool,

    /// Write the JSON report here
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CompareReport {
    discrepancies: DiscrepancyReport,
    extraction_failures: Vec<ExtractionFailure>,
    #[serde(skip_serializing_if = "Option::is_none")]
    comparison: Option<DatasetComparison>,
}

/// Execute compare command
pub fn execute(args: CompareArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = args.common.setup()?.catalog;
    let source_text = args.source_text.unwrap_or(config.source_text);
    let catalog_path = args.catalog.unwrap_or(config.source_catalog);
    let mapping_path = args.mapping.unwrap_or(config.mapping_text);

    let batch = source_dataset(&source_text)?;
    let source = batch.records;
    let target = load_catalog(&catalog_path)?;
    let mapping = load_mapping(&mapping_path, &config.mapping_marker)?;

    let discrepancies = find_discrepancies(&source, &target, &mapping);
    print!("{}", render_discrepancy_summary(&discrepancies));
    print!("{}", render_extraction_failures(&batch.failures));

    let comparison = args.symmetric.then(|| compare_datasets(&source, &target));
    if let Some(cmp) = &comparison {
        println!();
        print!(
            "{}",
            render_comparison_summary(
                cmp,
                &source_text.display().to_string(),
                &catalog_path.display().to_string()
            )
        );
    }

    write_report(
        args.out.as_deref(),
        &CompareReport {
            discrepancies,
            extraction_failures: batch.failures,
            comparison,
        },
    )
}

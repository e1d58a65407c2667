//! Duplicates command
//!
//! Usage: rolesync duplicates [--catalog <PATH>] [--strict]

use super::{write_report, CommonArgs};
use clap::Args;
use rolesync_core::diff::{find_duplicates, render_duplicate_summary};
use rolesync_store::catalog::load_catalog;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct DuplicatesArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Catalog to check (overrides config)
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Exit with an error when any duplicate or empty id is found
    #[arg(long)]
    pub strict: bool,

    /// Write the JSON report here
    #[arg(long)]
    pub out: Option<PathBuf>,
}

/// Execute duplicates command
pub fn execute(args: DuplicatesArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = args.common.setup()?.catalog;
    let catalog_path = args.catalog.unwrap_or(config.source_catalog);

    let dataset = load_catalog(&catalog_path)?;
    let report = find_duplicates(&dataset);
    print!("{}", render_duplicate_summary(&report));
    write_report(args.out.as_deref(), &report)?;

    if args.strict && !report.is_clean() {
        return Err(format!(
            "{} duplicate group(s) and {} empty id(s) in {}",
            report.groups.len(),
            report.empty_ids.len(),
            catalog_path.display()
        )
        .into());
    }
    Ok(())
}

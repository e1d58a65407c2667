//! Stats command
//!
//! Usage: rolesync stats [--catalog <PATH>] [--json]

use super::CommonArgs;
use clap::Args;
use rolesync_core::diff::{render_team_counts, team_counts};
use rolesync_store::catalog::load_catalog;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct StatsArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Catalog to count (overrides config)
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Print counts as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute stats command
pub fn execute(args: StatsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = args.common.setup()?.catalog;
    let catalog_path = args.catalog.unwrap_or(config.source_catalog);

    let counts = team_counts(&load_catalog(&catalog_path)?);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&counts)?);
    } else {
        print!("{}", render_team_counts(&counts));
    }
    Ok(())
}

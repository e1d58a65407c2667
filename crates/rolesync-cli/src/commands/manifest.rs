//! Manifest command
//!
//! Usage: rolesync manifest [--json-root <DIR>] [--output <PATH>]

use super::CommonArgs;
use clap::Args;
use rolesync_store::manifest::{build_manifest, write_manifest};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ManifestArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Root that jsonUrl values are relative to (overrides config)
    #[arg(long)]
    pub public_root: Option<PathBuf>,

    /// Document tree root (overrides config)
    #[arg(long)]
    pub json_root: Option<PathBuf>,

    /// Manifest output file (overrides config)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Print the entry count without writing the manifest
    #[arg(long)]
    pub dry_run: bool,
}

/// Execute manifest command
pub fn execute(args: ManifestArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = args.common.setup()?.manifest;
    if let Some(public_root) = args.public_root {
        config.public_root = public_root;
    }
    if let Some(json_root) = args.json_root {
        config.json_root = json_root;
    }
    if let Some(output) = args.output {
        config.output = output;
    }

    let manifest = build_manifest(&config)?;
    if args.dry_run {
        println!("Dry run (no write):");
        println!("  entries: {}", manifest.scripts.len());
        return Ok(());
    }

    write_manifest(&config.output, &manifest)?;
    println!("Manifest written:");
    println!("  path: {}", config.output.display());
    println!("  entries: {}", manifest.scripts.len());
    println!("  generated_at: {}", manifest.generated_at);
    Ok(())
}

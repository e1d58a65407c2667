//! Subcommands and the options they share

pub mod compare;
pub mod duplicates;
pub mod extract;
pub mod manifest;
pub mod stats;

use clap::Args;
use rolesync_core::extract::{BatchExtraction, FieldSpec, SourceText};
use rolesync_core::logging_facility::{init, Profile};
use rolesync_store::catalog::read_text_source;
use rolesync_store::persist::write_json_pretty;
use rolesync_store::SyncConfig;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct CommonArgs {
    /// Path to a rolesync TOML config (defaults apply when omitted)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Emit JSON logs instead of human-readable ones
    #[arg(long)]
    pub log_json: bool,
}

impl CommonArgs {
    /// Install logging, then load the run configuration.
    pub fn setup(&self) -> Result<SyncConfig, Box<dyn std::error::Error>> {
        init(if self.log_json {
            Profile::Production
        } else {
            Profile::Development
        });
        Ok(SyncConfig::load(self.config.as_deref())?)
    }
}

/// Every block of a text source, read with the role field spec.
///
/// Blocks that cannot be extracted are kept as failures in the batch.
pub fn source_dataset(path: &Path) -> Result<BatchExtraction, Box<dyn std::error::Error>> {
    let text = SourceText::new(&read_text_source(path)?);
    let ids = text.block_ids();
    Ok(text.extract_all(ids.iter().map(String::as_str), &FieldSpec::role()))
}

/// Write `report` to `out` when a path was given.
pub fn write_report<T: Serialize + ?Sized>(
    out: Option<&Path>,
    report: &T,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = out {
        write_json_pretty(path, report)?;
        println!("Report written to {}", path.display());
    }
    Ok(())
}

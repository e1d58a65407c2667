//! rolesync CLI
//!
//! Command-line front-end for catalog reconciliation and manifest building

use clap::{Parser, Subcommand};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "rolesync")]
#[command(about = "rolesync - Role catalog reconciliation and script manifests", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Report source roles whose mapped id is missing from the catalog
    Compare(commands::compare::CompareArgs),
    /// Report duplicate and empty ids in the catalog
    Duplicates(commands::duplicates::DuplicatesArgs),
    /// Extract source roles missing from the catalog, optionally merging them
    Extract(commands::extract::ExtractArgs),
    /// Build the script manifest from the document tree
    Manifest(commands::manifest::ManifestArgs),
    /// Count catalog roles per team
    Stats(commands::stats::StatsArgs),
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compare(args) => commands::compare::execute(args),
        Commands::Duplicates(args) => commands::duplicates::execute(args),
        Commands::Extract(args) => commands::extract::execute(args),
        Commands::Manifest(args) => commands::manifest::execute(args),
        Commands::Stats(args) => commands::stats::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

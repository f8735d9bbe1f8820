//! Rewind CLI
//!
//! Command-line interface for inspecting entity history

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rewind_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "rewind")]
#[command(about = "Rewind - entity history and point-in-time reconstruction", long_about = None)]
struct Cli {
    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    json_logs: bool,

    /// Engine configuration file (YAML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List recorded events
    Events(commands::events::EventsArgs),
    /// Reconstruct an entity from its history
    Reconstruct(commands::reconstruct::ReconstructArgs),
    /// Show an entity's current state
    Show(commands::show::ShowArgs),
    /// Compute forward and rollback patches between two JSON documents
    Diff(commands::diff::DiffArgs),
}

fn main() {
    let cli = Cli::parse();

    init(if cli.json_logs {
        Profile::Production
    } else {
        Profile::Development
    });

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Events(args) => commands::events::execute(args, config),
        Commands::Reconstruct(args) => commands::reconstruct::execute(args, config),
        Commands::Show(args) => commands::show::execute(args, config),
        Commands::Diff(args) => commands::diff::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

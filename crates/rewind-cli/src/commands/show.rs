//! Show current entity state
//!
//! Usage: rewind show --seed <PATH> --entity-id <N>

use clap::Args;
use std::path::{Path, PathBuf};

use super::{load_engine, print_json, CommandResult};

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Seed scenario (YAML)
    #[arg(long)]
    pub seed: PathBuf,

    #[arg(long)]
    pub entity_id: i64,
}

pub fn execute(args: ShowArgs, config: Option<&Path>) -> CommandResult {
    let engine = load_engine(&args.seed, config)?;
    print_json(&engine.get_entity(args.entity_id)?)
}

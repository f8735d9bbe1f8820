//! Reconstruct an entity
//!
//! Usage: rewind reconstruct --seed <PATH> --entity-id <N> --event-id <N> [--direction rollback|update]

use clap::Args;
use std::path::{Path, PathBuf};

use rewind_core::model::PatchDirection;

use super::{load_engine, print_json, CommandResult};

#[derive(Debug, Args)]
pub struct ReconstructArgs {
    /// Seed scenario (YAML)
    #[arg(long)]
    pub seed: PathBuf,

    #[arg(long)]
    pub entity_id: i64,

    /// Earliest event in the chain
    #[arg(long)]
    pub event_id: i64,

    /// rollback (inverse) or update (forward)
    #[arg(long, default_value = "rollback")]
    pub direction: PatchDirection,
}

pub fn execute(args: ReconstructArgs, config: Option<&Path>) -> CommandResult {
    let engine = load_engine(&args.seed, config)?;
    let entity = engine.reconstruct(args.entity_id, args.event_id, args.direction)?;
    print_json(&entity)
}

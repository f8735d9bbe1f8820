//! List events
//!
//! Usage: rewind events --seed <PATH> [--from-id <N>] [--since <TIMESTAMP>]

use clap::Args;
use std::path::{Path, PathBuf};

use rewind_core::event_log::EventFilter;

use super::{load_engine, print_json, CommandResult};

#[derive(Debug, Args)]
pub struct EventsArgs {
    /// Seed scenario (YAML)
    #[arg(long)]
    pub seed: PathBuf,

    /// Only events with this id or later
    #[arg(long)]
    pub from_id: Option<i64>,

    /// Only events created at or after this time (RFC 3339 or YYYY-MM-DD)
    #[arg(long)]
    pub since: Option<String>,
}

pub fn execute(args: EventsArgs, config: Option<&Path>) -> CommandResult {
    let engine = load_engine(&args.seed, config)?;

    let mut filter = EventFilter::all();
    if let Some(id) = args.from_id {
        filter = filter.from_id(id);
    }
    if let Some(raw) = &args.since {
        filter = filter.since(raw)?;
    }

    print_json(&engine.list_events(&filter)?)
}

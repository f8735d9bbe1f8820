pub mod diff;
pub mod events;
pub mod reconstruct;
pub mod show;

use std::path::Path;

use rewind_core::model::User;
use rewind_core::EngineConfig;
use rewind_engine::seed::{import_seed, parse_seed_file};
use rewind_engine::TemporalEngine;
use serde::Serialize;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Build an engine from the optional config file and replay a seed into it
pub fn load_engine(
    seed: &Path,
    config: Option<&Path>,
) -> Result<TemporalEngine<User>, Box<dyn std::error::Error>> {
    let config = match config {
        Some(path) => EngineConfig::from_yaml_file(path)?,
        None => EngineConfig::default(),
    };
    let engine = TemporalEngine::new(&config);
    import_seed(&engine, parse_seed_file(seed)?)?;
    Ok(engine)
}

/// Pretty-print `value` as JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CommandResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

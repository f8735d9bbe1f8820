//! Scenario seeds
//!
//! Provides:
//! - Seed Format v0 schema
//! - YAML parser with validation
//! - Importer that replays a seed through the engine

pub mod format_v0;
pub mod importer;
pub mod parser;

pub use format_v0::{SeedMutation, SeedV0};
pub use importer::import_seed;
pub use parser::{parse_seed_file, parse_seed_str};

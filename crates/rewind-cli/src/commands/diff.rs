//! Diff two JSON documents
//!
//! Usage: rewind diff --before <PATH> --after <PATH>

use clap::Args;
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

use rewind_core::errors::RewindError;
use rewind_core::patch::{diff_values, Patch};

use super::{print_json, CommandResult};

#[derive(Debug, Args)]
pub struct DiffArgs {
    #[arg(long)]
    pub before: PathBuf,

    #[arg(long)]
    pub after: PathBuf,
}

#[derive(Serialize)]
struct DiffOutput {
    update: Patch,
    rollback: Patch,
}

fn read_json(path: &Path) -> Result<Value, RewindError> {
    let bytes = std::fs::read(path).map_err(|e| RewindError::Io {
        op: format!("read {}", path.display()),
        reason: e.to_string(),
    })?;
    serde_json::from_slice(&bytes).map_err(|e| RewindError::Decode {
        reason: format!("{}: {}", path.display(), e),
    })
}

pub fn execute(args: DiffArgs) -> CommandResult {
    let before = read_json(&args.before)?;
    let after = read_json(&args.after)?;
    let pair = diff_values(&before, &after);

    print_json(&DiffOutput {
        update: pair.forward,
        rollback: pair.inverse,
    })
}

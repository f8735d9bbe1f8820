use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::RewindError;

/// Which patch of each event a reconstruction replays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchDirection {
    /// Replay `update` patches oldest to newest
    Forward,
    /// Replay `rollback` patches newest to oldest
    Inverse,
}

impl PatchDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatchDirection::Forward => "forward",
            PatchDirection::Inverse => "inverse",
        }
    }
}

impl fmt::Display for PatchDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PatchDirection {
    type Err = RewindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "forward" | "update" => Ok(PatchDirection::Forward),
            "inverse" | "rollback" => Ok(PatchDirection::Inverse),
            _ => Err(RewindError::InvalidDirection {
                value: s.to_string(),
            }),
        }
    }
}

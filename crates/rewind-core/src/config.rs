//! Engine configuration.
//!
//! ```yaml
//! excluded_paths:
//!   - /bag
//!   - /profile/ssn
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, RewindError};
use crate::patch::JsonPointer;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Paths never recorded in or replayed from history, on top of the
    /// entity type's own exclusions
    #[serde(default)]
    pub excluded_paths: Vec<JsonPointer>,
}

impl EngineConfig {
    /// Parse configuration from YAML text.
    ///
    /// # Errors
    ///
    /// `Config` on malformed YAML, unknown keys, or invalid pointers.
    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        serde_yaml::from_str(raw).map_err(|e| RewindError::Config {
            reason: e.to_string(),
        })
    }

    /// Read and parse a YAML configuration file.
    ///
    /// # Errors
    ///
    /// `Io` if the file cannot be read, otherwise as [`from_yaml_str`](Self::from_yaml_str).
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| RewindError::Io {
            op: format!("read config {}", path.display()),
            reason: e.to_string(),
        })?;
        Self::from_yaml_str(&raw)
    }

    /// Configured paths merged with `builtin`, deduplicated, builtin first
    pub fn merged_exclusions(&self, builtin: Vec<JsonPointer>) -> Vec<JsonPointer> {
        let mut merged = builtin;
        for pointer in &self.excluded_paths {
            if !merged.contains(pointer) {
                merged.push(pointer.clone());
            }
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_paths() {
        let config = EngineConfig::from_yaml_str("excluded_paths: [/bag, /a~1b]").unwrap();
        assert_eq!(config.excluded_paths.len(), 2);
        assert_eq!(config.excluded_paths[1].segments(), &["a/b".to_string()]);
    }

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(EngineConfig::from_yaml_str("{}").unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_rejects_unknown_keys_and_bad_pointers() {
        assert!(matches!(
            EngineConfig::from_yaml_str("exclude: [/bag]"),
            Err(RewindError::Config { .. })
        ));
        assert!(matches!(
            EngineConfig::from_yaml_str("excluded_paths: [bag]"),
            Err(RewindError::Config { .. })
        ));
    }

    #[test]
    fn test_merge_dedups() {
        let config = EngineConfig::from_yaml_str("excluded_paths: [/bag, /nick]").unwrap();
        let merged = config.merged_exclusions(vec![JsonPointer::parse("/bag").unwrap()]);
        let rendered: Vec<String> = merged.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["/bag", "/nick"]);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "excluded_paths:\n  - /secret").unwrap();
        let config = EngineConfig::from_yaml_file(file.path()).unwrap();
        assert_eq!(config.excluded_paths[0].to_string(), "/secret");

        assert!(matches!(
            EngineConfig::from_yaml_file("/definitely/not/here.yaml"),
            Err(RewindError::Io { .. })
        ));
    }
}

//! Seed parser with validation
//!
//! Parses YAML and validates the schema version and initial id uniqueness.

use std::collections::HashSet;
use std::path::Path;

use rewind_core::errors::{Result, RewindError};
use rewind_core::model::Entity;

use crate::seed::format_v0::SeedV0;

fn seed_validation(reason: impl Into<String>) -> RewindError {
    RewindError::SeedValidation {
        reason: reason.into(),
    }
}

/// Parse a seed file from a path
///
/// # Errors
///
/// `Io` if the file cannot be read, otherwise as [`parse_seed_str`].
pub fn parse_seed_file<E: Entity>(path: &Path) -> Result<SeedV0<E>> {
    let content = std::fs::read_to_string(path).map_err(|e| RewindError::Io {
        op: format!("read seed {}", path.display()),
        reason: e.to_string(),
    })?;
    parse_seed_str(&content)
}

/// Parse a seed from a string
///
/// # Errors
///
/// `SeedValidation` on malformed YAML or a seed that fails validation.
pub fn parse_seed_str<E: Entity>(content: &str) -> Result<SeedV0<E>> {
    let seed: SeedV0<E> = serde_yaml::from_str(content)
        .map_err(|e| seed_validation(format!("YAML parse error: {}", e)))?;

    validate_seed(&seed)?;

    Ok(seed)
}

fn validate_seed<E: Entity>(seed: &SeedV0<E>) -> Result<()> {
    if seed.schema_version != 0 {
        return Err(seed_validation(format!(
            "Unsupported schema_version: {}. Expected 0",
            seed.schema_version
        )));
    }

    let mut ids = HashSet::new();
    for entity in &seed.entities {
        if !ids.insert(entity.entity_id()) {
            return Err(seed_validation(format!(
                "Duplicate entity id {} in entities",
                entity.entity_id()
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rewind_core::model::User;

    #[test]
    fn test_parse_minimal_seed() {
        let seed: SeedV0<User> = parse_seed_str("schema_version: 0\n").unwrap();
        assert!(seed.entities.is_empty());
        assert!(seed.mutations.is_empty());
    }

    #[test]
    fn test_parse_full_seed() {
        let yaml = r#"
schema_version: 0
entities:
  - { id: 1, name: John, age: 16, bag: { phone: "555-0100" } }
mutations:
  - initiator: admin
    subject: some_user
    action: user_update
    entity: { id: 1, name: John, age: 17 }
"#;
        let seed: SeedV0<User> = parse_seed_str(yaml).unwrap();
        assert_eq!(seed.entities[0].bag.as_ref().unwrap().phone.expose(), "555-0100");
        assert_eq!(seed.mutations[0].entity.age, 17);
        assert_eq!(seed.mutations[0].action, "user_update");
    }

    #[test]
    fn test_rejects_wrong_version() {
        let err = parse_seed_str::<User>("schema_version: 1\n").unwrap_err();
        assert!(matches!(err, RewindError::SeedValidation { ref reason } if reason.contains("schema_version")));
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let yaml = "schema_version: 0\nentities:\n  - { id: 1 }\n  - { id: 1 }\n";
        let err = parse_seed_str::<User>(yaml).unwrap_err();
        assert!(matches!(err, RewindError::SeedValidation { ref reason } if reason.contains("Duplicate")));
    }

    #[test]
    fn test_rejects_malformed_yaml_and_unknown_keys() {
        assert!(matches!(
            parse_seed_str::<User>("schema_version: [oops"),
            Err(RewindError::SeedValidation { .. })
        ));
        assert!(matches!(
            parse_seed_str::<User>("schema_version: 0\nusers: []\n"),
            Err(RewindError::SeedValidation { .. })
        ));
    }
}

use rewind_core_types::Sensitive;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId};
use crate::patch::JsonPointer;

/// User record tracked by the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: EntityId,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub age: u32,

    #[serde(default)]
    pub is_adult: bool,

    /// Contact details; never time-traveled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bag: Option<Bag>,
}

/// Sensitive contact details embedded in a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bag {
    pub phone: Sensitive<String>,
}

impl User {
    pub fn new(id: EntityId, name: impl Into<String>, age: u32) -> Self {
        Self {
            id,
            name: name.into(),
            age,
            is_adult: age >= 18,
            bag: None,
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.bag = Some(Bag {
            phone: Sensitive::new(phone.into()),
        });
        self
    }
}

impl Entity for User {
    fn entity_id(&self) -> EntityId {
        self.id
    }

    fn excluded_paths() -> Vec<JsonPointer> {
        vec![JsonPointer::from_segments(["bag"])]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialized_shape() {
        let user = User::new(1, "John", 16);
        assert_eq!(
            serde_json::to_value(&user).unwrap(),
            json!({"id": 1, "name": "John", "age": 16, "is_adult": false})
        );
    }

    #[test]
    fn test_bag_serializes_phone_but_debug_redacts_it() {
        let user = User::new(1, "John", 30).with_phone("555-0100");
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["bag"], json!({"phone": "555-0100"}));
        assert!(!format!("{:?}", user).contains("555-0100"));
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let user: User = serde_json::from_value(json!({"id": 3})).unwrap();
        assert_eq!(user, User::new(3, "", 0));
    }

    #[test]
    fn test_excludes_bag() {
        assert_eq!(User::excluded_paths()[0].to_string(), "/bag");
    }
}

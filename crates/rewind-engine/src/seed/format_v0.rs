//! Seed Format v0 schema
//!
//! ```yaml
//! schema_version: 0
//! entities:
//!   - { id: 1, name: John, age: 16 }
//! mutations:
//!   - initiator: admin
//!     subject: some_user
//!     action: user_update
//!     entity: { id: 1, name: John, age: 17 }
//! ```

use serde::{Deserialize, Serialize};

/// Top-level seed file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedV0<E> {
    /// Schema version (must be 0 for this format)
    pub schema_version: u32,

    /// Initial store contents; no events are recorded for these
    #[serde(default = "Vec::new")]
    pub entities: Vec<E>,

    /// Updates applied in order, each recording one event
    #[serde(default = "Vec::new")]
    pub mutations: Vec<SeedMutation<E>>,
}

/// One recorded update: the entity's full new state plus who did it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedMutation<E> {
    pub initiator: String,
    pub subject: String,
    pub action: String,
    pub entity: E,
}

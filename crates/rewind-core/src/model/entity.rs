use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::patch::JsonPointer;

/// Stable numeric identity of an entity in the store
pub type EntityId = i64;

/// A tree-shaped value whose history the engine tracks.
///
/// Content is replaced wholesale on update; identity is `entity_id()`.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + 'static {
    /// Key of this entity in the store
    fn entity_id(&self) -> EntityId;

    /// Paths that are never recorded in, or replayed from, history.
    ///
    /// Merged with any paths configured on the engine.
    fn excluded_paths() -> Vec<JsonPointer> {
        Vec::new()
    }
}

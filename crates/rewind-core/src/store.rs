//! Keyed entity storage.
//!
//! The engine only needs lookup and wholesale replace. Storage sits
//! behind a trait so a durable backend can be substituted without
//! touching the engine.

use std::collections::BTreeMap;

use crate::model::{Entity, EntityId};

/// Lookup/replace by identifier
pub trait EntityRepository<E: Entity>: Send {
    fn get(&self, id: EntityId) -> Option<&E>;

    /// Store `entity` under its id, returning the previous value
    fn replace(&mut self, entity: E) -> Option<E>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-lifetime repository backed by an ordered map
#[derive(Debug, Clone)]
pub struct InMemoryStore<E> {
    entities: BTreeMap<EntityId, E>,
}

impl<E> Default for InMemoryStore<E> {
    fn default() -> Self {
        Self {
            entities: BTreeMap::new(),
        }
    }
}

impl<E: Entity> InMemoryStore<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.keys().copied()
    }
}

impl<E: Entity> EntityRepository<E> for InMemoryStore<E> {
    fn get(&self, id: EntityId) -> Option<&E> {
        self.entities.get(&id)
    }

    fn replace(&mut self, entity: E) -> Option<E> {
        self.entities.insert(entity.entity_id(), entity)
    }

    fn len(&self) -> usize {
        self.entities.len()
    }
}

impl<E: Entity> FromIterator<E> for InMemoryStore<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        let mut store = Self::new();
        for entity in iter {
            store.replace(entity);
        }
        store
    }
}

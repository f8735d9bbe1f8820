//! The temporal engine: entity store plus event log under one mutex.
//!
//! Every mutation diffs, sanitizes, replaces and appends inside a single
//! critical section, so event ids are assigned in commit order and an
//! event is never visible without its store update. Reconstruction
//! snapshots the entity and its chain under the lock and folds outside it.

use std::sync::{Mutex, MutexGuard};
use std::time::Instant;

use rewind_core::errors::{Result, RewindError};
use rewind_core::event_log::{EventFilter, EventLog};
use rewind_core::model::{Entity, EntityId, Event, EventDraft, EventId, PatchDirection};
use rewind_core::patch::{diff_values, sanitize, JsonPointer};
use rewind_core::reconstruct::reconstruct;
use rewind_core::store::{EntityRepository, InMemoryStore};
use rewind_core::EngineConfig;
use rewind_core::{log_op_end, log_op_error, log_op_start};
use serde_json::Value;

struct EngineState<E: Entity> {
    entities: Box<dyn EntityRepository<E>>,
    log: EventLog,
}

/// Mutable entity store with an append-only history of every change
pub struct TemporalEngine<E: Entity> {
    state: Mutex<EngineState<E>>,
    excluded: Vec<JsonPointer>,
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

impl<E: Entity> TemporalEngine<E> {
    /// Engine over an empty in-memory store
    pub fn new(config: &EngineConfig) -> Self {
        Self::with_repository(config, Box::new(InMemoryStore::<E>::new()))
    }

    /// Engine over a caller-supplied repository
    pub fn with_repository(config: &EngineConfig, entities: Box<dyn EntityRepository<E>>) -> Self {
        Self {
            state: Mutex::new(EngineState {
                entities,
                log: EventLog::new(),
            }),
            excluded: config.merged_exclusions(E::excluded_paths()),
        }
    }

    /// Paths kept out of history: the entity's own plus configured ones
    pub fn excluded_paths(&self) -> &[JsonPointer] {
        &self.excluded
    }

    fn lock(&self) -> Result<MutexGuard<'_, EngineState<E>>> {
        Ok(self.state.lock()?)
    }

    /// Put an entity in the store without recording an event.
    ///
    /// Used to seed initial state.
    ///
    /// # Errors
    ///
    /// `StatePoisoned` if the engine lock is poisoned.
    pub fn insert_entity(&self, entity: E) -> Result<()> {
        let entity_id = entity.entity_id();
        log_op_start!("insert_entity", entity_id = entity_id);
        let start = Instant::now();

        let mut state = self.lock().map_err(|e| {
            log_op_error!("insert_entity", e.clone(), duration_ms = elapsed_ms(start));
            e
        })?;
        state.entities.replace(entity);
        drop(state);

        log_op_end!("insert_entity", duration_ms = elapsed_ms(start));
        Ok(())
    }

    /// Current state of an entity.
    ///
    /// # Errors
    ///
    /// `EntityNotFound` if no entity has `id`.
    pub fn get_entity(&self, id: EntityId) -> Result<E> {
        log_op_start!("get_entity", entity_id = id);
        let start = Instant::now();

        let entity = self
            .lock()
            .and_then(|state| {
                state
                    .entities
                    .get(id)
                    .cloned()
                    .ok_or(RewindError::EntityNotFound { entity_id: id })
            })
            .map_err(|e| {
                log_op_error!("get_entity", e.clone(), duration_ms = elapsed_ms(start));
                e
            })?;

        log_op_end!("get_entity", duration_ms = elapsed_ms(start));
        Ok(entity)
    }

    /// Append an event describing `before -> after` without touching the store.
    ///
    /// `before` is `None` when the entity is being created. Returns the new
    /// event's id.
    ///
    /// The caller owns the matching store write, and the two are not one
    /// critical section. Use [`TemporalEngine::update_entity`] to persist a
    /// new state and record its event atomically.
    ///
    /// # Errors
    ///
    /// `Encoding` if either state cannot be serialized.
    pub fn record_mutation(
        &self,
        initiator: &str,
        subject: &str,
        action: &str,
        before: Option<&E>,
        after: &E,
    ) -> Result<EventId> {
        let entity_id = after.entity_id();
        log_op_start!("record_mutation", entity_id = entity_id, action = action);
        let start = Instant::now();

        let event_id = self
            .draft(initiator, subject, action, before, after)
            .and_then(|draft| {
                let mut state = self.lock()?;
                Ok(state.log.append(draft))
            })
            .map_err(|e| {
                log_op_error!(
                    "record_mutation",
                    e.clone(),
                    duration_ms = elapsed_ms(start),
                    entity_id = entity_id
                );
                e
            })?;

        log_op_end!(
            "record_mutation",
            duration_ms = elapsed_ms(start),
            event_id = event_id
        );
        Ok(event_id)
    }

    /// Replace an entity and record the change as one atomic step.
    ///
    /// The prior state is whatever the store holds under the entity's id,
    /// or `null` if it is new. Returns the new event's id.
    ///
    /// # Errors
    ///
    /// `Encoding` if either state cannot be serialized, `StatePoisoned` if
    /// the engine lock is poisoned. Nothing is stored on failure.
    pub fn update_entity(
        &self,
        initiator: &str,
        subject: &str,
        action: &str,
        entity: E,
    ) -> Result<EventId> {
        let entity_id = entity.entity_id();
        log_op_start!("update_entity", entity_id = entity_id, action = action);
        let start = Instant::now();

        let event_id = self
            .update_entity_impl(initiator, subject, action, entity)
            .map_err(|e| {
                log_op_error!(
                    "update_entity",
                    e.clone(),
                    duration_ms = elapsed_ms(start),
                    entity_id = entity_id
                );
                e
            })?;

        log_op_end!(
            "update_entity",
            duration_ms = elapsed_ms(start),
            event_id = event_id
        );
        Ok(event_id)
    }

    fn update_entity_impl(
        &self,
        initiator: &str,
        subject: &str,
        action: &str,
        entity: E,
    ) -> Result<EventId> {
        let mut state = self.lock()?;
        let before = state.entities.get(entity.entity_id()).cloned();
        let draft = self.draft(initiator, subject, action, before.as_ref(), &entity)?;
        state.entities.replace(entity);
        Ok(state.log.append(draft))
    }

    fn draft(
        &self,
        initiator: &str,
        subject: &str,
        action: &str,
        before: Option<&E>,
        after: &E,
    ) -> Result<EventDraft> {
        let before = match before {
            Some(entity) => to_value(entity)?,
            None => Value::Null,
        };
        let pair = diff_values(&before, &to_value(after)?);
        tracing::debug!(
            forward_ops = pair.forward.len(),
            inverse_ops = pair.inverse.len(),
            "computed patch pair"
        );

        Ok(EventDraft {
            entity_id: after.entity_id(),
            initiator: initiator.to_string(),
            subject: subject.to_string(),
            action: action.to_string(),
            forward_patch: sanitize(&pair.forward, &self.excluded),
            inverse_patch: sanitize(&pair.inverse, &self.excluded),
        })
    }

    /// Entity state reconstructed from the chain starting at `event_id`.
    ///
    /// Only events recorded for `entity_id` take part in the fold.
    ///
    /// # Errors
    ///
    /// - `EntityNotFound` if the entity is not in the store
    /// - `NoEvents` if `event_id` is outside the log
    /// - `PatchApply`, `PatchDecode`, `Decode` from the fold
    pub fn reconstruct(
        &self,
        entity_id: EntityId,
        event_id: EventId,
        direction: PatchDirection,
    ) -> Result<E> {
        log_op_start!(
            "reconstruct",
            entity_id = entity_id,
            event_id = event_id,
            direction = direction.as_str()
        );
        let start = Instant::now();

        let (entity, chain_len) = self
            .snapshot(entity_id, event_id)
            .and_then(|(current, chain)| {
                let entity = reconstruct(&current, &chain, direction, &self.excluded)?;
                Ok((entity, chain.len()))
            })
            .map_err(|e| {
                log_op_error!(
                    "reconstruct",
                    e.clone(),
                    duration_ms = elapsed_ms(start),
                    entity_id = entity_id,
                    event_id = event_id
                );
                e
            })?;

        log_op_end!(
            "reconstruct",
            duration_ms = elapsed_ms(start),
            chain_len = chain_len as u64
        );
        Ok(entity)
    }

    fn snapshot(&self, entity_id: EntityId, event_id: EventId) -> Result<(E, Vec<Event>)> {
        let state = self.lock()?;
        let current = state
            .entities
            .get(entity_id)
            .cloned()
            .ok_or(RewindError::EntityNotFound { entity_id })?;
        let chain = state
            .log
            .range_from(event_id)?
            .iter()
            .filter(|event| event.entity_id == entity_id)
            .cloned()
            .collect();
        Ok((current, chain))
    }

    /// Events matching `filter`, ascending.
    ///
    /// # Errors
    ///
    /// `NoEvents` if `filter.from_id` is outside the log.
    pub fn list_events(&self, filter: &EventFilter) -> Result<Vec<Event>> {
        log_op_start!("list_events");
        let start = Instant::now();

        let events = self
            .lock()
            .and_then(|state| {
                let candidates = match filter.from_id {
                    Some(id) => state.log.range_from(id)?,
                    None => state.log.events(),
                };
                Ok(candidates
                    .iter()
                    .filter(|event| filter.matches(event))
                    .cloned()
                    .collect::<Vec<_>>())
            })
            .map_err(|e| {
                log_op_error!("list_events", e.clone(), duration_ms = elapsed_ms(start));
                e
            })?;

        log_op_end!(
            "list_events",
            duration_ms = elapsed_ms(start),
            chain_len = events.len() as u64
        );
        Ok(events)
    }

    /// Number of events recorded so far.
    ///
    /// # Errors
    ///
    /// `StatePoisoned` if the engine lock is poisoned.
    pub fn event_count(&self) -> Result<usize> {
        log_op_start!("event_count");
        let start = Instant::now();

        let count = self.lock().map(|state| state.log.len()).map_err(|e| {
            log_op_error!("event_count", e.clone(), duration_ms = elapsed_ms(start));
            e
        })?;

        log_op_end!("event_count", duration_ms = elapsed_ms(start));
        Ok(count)
    }
}

fn to_value<E: Entity>(entity: &E) -> Result<Value> {
    serde_json::to_value(entity).map_err(|e| RewindError::Encoding {
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rewind_core::model::User;

    fn engine_with_john() -> TemporalEngine<User> {
        let engine = TemporalEngine::new(&EngineConfig::default());
        engine.insert_entity(User::new(1, "John", 16)).unwrap();
        engine
    }

    #[test]
    fn test_update_records_event_and_replaces_entity() {
        let engine = engine_with_john();
        let id = engine
            .update_entity("admin", "some_user", "user_update", User::new(1, "John", 17))
            .unwrap();

        assert_eq!(id, 1);
        assert_eq!(engine.get_entity(1).unwrap().age, 17);
        assert_eq!(engine.event_count().unwrap(), 1);
    }

    #[test]
    fn test_record_mutation_leaves_store_alone() {
        let engine = engine_with_john();
        let before = User::new(1, "John", 16);
        let after = User::new(1, "John", 40);
        engine
            .record_mutation("admin", "u", "user_update", Some(&before), &after)
            .unwrap();

        assert_eq!(engine.get_entity(1).unwrap().age, 16);
        assert_eq!(engine.event_count().unwrap(), 1);
    }

    #[test]
    fn test_user_exclusions_are_merged_with_config() {
        let config = EngineConfig::from_yaml_str("excluded_paths: [/name, /bag]").unwrap();
        let engine: TemporalEngine<User> = TemporalEngine::new(&config);
        let rendered: Vec<String> = engine.excluded_paths().iter().map(|p| p.to_string()).collect();
        assert_eq!(rendered, ["/bag", "/name"]);
    }

    #[test]
    fn test_get_missing_entity() {
        let engine = engine_with_john();
        assert_eq!(
            engine.get_entity(9).unwrap_err(),
            RewindError::EntityNotFound { entity_id: 9 }
        );
    }
}

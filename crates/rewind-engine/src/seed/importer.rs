//! Seed importer orchestration
//!
//! Loads initial entities without history, then replays every mutation
//! through [`TemporalEngine::update_entity`] so each one records an event.

use rewind_core::errors::Result;
use rewind_core::model::{Entity, EventId};

use crate::engine::TemporalEngine;
use crate::seed::format_v0::SeedV0;

/// Import a parsed seed into `engine`
///
/// Returns the ids of the events recorded for the seed's mutations, in
/// order.
///
/// # Errors
///
/// Propagates the first engine error; mutations before it stay applied.
pub fn import_seed<E: Entity>(engine: &TemporalEngine<E>, seed: SeedV0<E>) -> Result<Vec<EventId>> {
    for entity in seed.entities {
        engine.insert_entity(entity)?;
    }

    seed.mutations
        .into_iter()
        .map(|m| engine.update_entity(&m.initiator, &m.subject, &m.action, m.entity))
        .collect()
}

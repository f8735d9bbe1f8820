//! Rewind Core - temporal reconstruction kernel
//!
//! This crate holds everything the engine needs that does not involve
//! locking or I/O:
//! - Entity and event models
//! - Structural patches: diff, sanitize, apply
//! - The append-only event log and its filters
//! - The reconstruction fold
//! - Keyed in-memory entity storage
//! - Error and logging facilities

pub mod config;
pub mod errors;
pub mod event_log;
pub mod logging_facility;
pub mod model;
pub mod patch;
pub mod reconstruct;
pub mod store;

// Re-export commonly used types
pub use config::EngineConfig;
pub use errors::{ExError, ExErrorKind, Result, RewindError};
pub use event_log::{EventFilter, EventLog};
pub use model::{Bag, Entity, EntityId, Event, EventDraft, EventId, PatchDirection, User};
pub use patch::{JsonPointer, Patch, PatchOperation, PatchPair};
pub use store::{EntityRepository, InMemoryStore};

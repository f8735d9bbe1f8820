//! Rewind Engine - Orchestration layer
//!
//! Coordinates the entity store and event log behind one lock, and loads
//! scenario seeds into a running engine.
//!
//! ## Logging Ownership
//!
//! The engine layer owns lifecycle logging:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure
//!
//! The core crate only uses `tracing::debug!()` for internal details.

pub mod engine;
pub mod seed;

pub use engine::TemporalEngine;

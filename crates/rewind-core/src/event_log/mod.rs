//! Append-only event log and its query filters.

pub mod filter;
pub mod log;

pub use filter::{parse_filter_timestamp, EventFilter};
pub use log::EventLog;

//! Query filters for listing events.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{Result, RewindError};
use crate::model::{Event, EventId};

/// Criteria for `list_events`. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventFilter {
    pub from_id: Option<EventId>,
    pub created_at_or_after: Option<DateTime<Utc>>,
}

impl EventFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn from_id(mut self, id: EventId) -> Self {
        self.from_id = Some(id);
        self
    }

    pub fn created_at_or_after(mut self, instant: DateTime<Utc>) -> Self {
        self.created_at_or_after = Some(instant);
        self
    }

    /// Set the time bound from a caller-supplied string.
    ///
    /// # Errors
    ///
    /// `InvalidFilter` if `raw` cannot be parsed.
    pub fn since(self, raw: &str) -> Result<Self> {
        Ok(self.created_at_or_after(parse_filter_timestamp(raw)?))
    }

    pub fn matches(&self, event: &Event) -> bool {
        self.from_id.map_or(true, |id| event.id >= id)
            && self
                .created_at_or_after
                .map_or(true, |instant| event.created_at >= instant)
    }
}

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Parse a filter timestamp.
///
/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM:SS` and `YYYY-MM-DD HH:MM:SS`
/// (both read as UTC), or a bare `YYYY-MM-DD` meaning midnight UTC.
///
/// # Errors
///
/// `InvalidFilter` for anything else.
pub fn parse_filter_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    let input = raw.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(input) {
        return Ok(parsed.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }
    if let Some(midnight) = NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Ok(Utc.from_utc_datetime(&midnight));
    }

    Err(RewindError::InvalidFilter {
        input: raw.to_string(),
        reason: "expected RFC 3339, 'YYYY-MM-DD HH:MM:SS' or 'YYYY-MM-DD'".to_string(),
    })
}

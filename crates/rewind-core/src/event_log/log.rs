use chrono::{DateTime, Utc};

use crate::errors::{Result, RewindError};
use crate::event_log::filter::parse_filter_timestamp;
use crate::model::{Event, EventDraft, EventId};

/// Ordered, append-only sequence of events.
///
/// Insertion order is identifier order: the event at index `i` has id
/// `i + 1`. Nothing is ever edited or removed.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamp `draft` with the next id and the current time, store it, and
    /// return the id.
    pub fn append(&mut self, draft: EventDraft) -> EventId {
        self.append_at(draft, Utc::now())
    }

    /// Same as [`append`](Self::append) with an explicit clock reading.
    ///
    /// The stored timestamp never goes below the latest event's, so a clock
    /// stepping backwards cannot break time ordering.
    pub fn append_at(&mut self, draft: EventDraft, now: DateTime<Utc>) -> EventId {
        let id = self.next_id();
        let created_at = match self.events.last() {
            Some(last) if last.created_at > now => last.created_at,
            _ => now,
        };
        tracing::debug!(
            event_id = id,
            entity_id = draft.entity_id,
            action = %draft.action,
            "appending event"
        );
        self.events.push(draft.into_event(id, created_at));
        id
    }

    /// Events with identifier `>= id`, ascending.
    ///
    /// # Errors
    ///
    /// `NoEvents` if the log is empty or `id` is not between 1 and the
    /// number of stored events.
    pub fn range_from(&self, id: EventId) -> Result<&[Event]> {
        let count = self.events.len();
        let index = usize::try_from(id)
            .ok()
            .filter(|&n| n >= 1 && n <= count)
            .ok_or(RewindError::NoEvents {
                event_id: id,
                event_count: count,
            })?;
        Ok(&self.events[index - 1..])
    }

    /// Events whose `created_at` is not before `instant`, ascending.
    pub fn created_at_or_after(&self, instant: DateTime<Utc>) -> Vec<&Event> {
        // Timestamps are monotonic, so the match is a suffix of the log
        let start = self.events.partition_point(|e| e.created_at < instant);
        self.events[start..].iter().collect()
    }

    /// String form of [`created_at_or_after`](Self::created_at_or_after).
    ///
    /// # Errors
    ///
    /// `InvalidFilter` if `raw` is not a recognised timestamp.
    pub fn filter_created_at_or_after(&self, raw: &str) -> Result<Vec<&Event>> {
        let instant = parse_filter_timestamp(raw)?;
        Ok(self.created_at_or_after(instant))
    }

    pub fn get(&self, id: EventId) -> Option<&Event> {
        let index = usize::try_from(id).ok()?.checked_sub(1)?;
        self.events.get(index)
    }

    pub fn latest(&self) -> Option<&Event> {
        self.events.last()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    fn next_id(&self) -> EventId {
        // A Vec cannot hold more than isize::MAX elements
        self.events.len() as EventId + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patch::Patch;
    use chrono::{Duration, TimeZone};

    fn draft(action: &str) -> EventDraft {
        EventDraft {
            entity_id: 1,
            initiator: "admin".to_string(),
            subject: "user".to_string(),
            action: action.to_string(),
            forward_patch: Patch::default(),
            inverse_patch: Patch::default(),
        }
    }

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn test_ids_are_one_based_and_gap_free() {
        let mut log = EventLog::new();
        let ids: Vec<EventId> = (0..4).map(|i| log.append(draft(&i.to_string()))).collect();
        assert_eq!(ids, [1, 2, 3, 4]);
        assert_eq!(log.len(), 4);
        assert_eq!(log.latest().map(|e| e.id), Some(4));
    }

    #[test]
    fn test_timestamps_never_decrease() {
        let mut log = EventLog::new();
        log.append_at(draft("a"), at(10));
        log.append_at(draft("b"), at(5));
        assert_eq!(log.get(2).unwrap().created_at, at(10));
    }

    #[test]
    fn test_range_from_boundaries() {
        let mut log = EventLog::new();
        for i in 0..3 {
            log.append(draft(&i.to_string()));
        }
        assert_eq!(log.range_from(1).unwrap().len(), 3);
        let tail = log.range_from(3).unwrap();
        assert_eq!(tail.len(), 1);
        assert_eq!(tail[0].id, 3);

        for bad in [0, -1, 4, 99] {
            assert_eq!(
                log.range_from(bad).unwrap_err(),
                RewindError::NoEvents {
                    event_id: bad,
                    event_count: 3
                }
            );
        }
    }

    #[test]
    fn test_range_from_empty_log_fails() {
        let log = EventLog::new();
        assert!(matches!(log.range_from(1), Err(RewindError::NoEvents { .. })));
    }

    #[test]
    fn test_created_at_or_after_is_inclusive() {
        let mut log = EventLog::new();
        log.append_at(draft("a"), at(0));
        log.append_at(draft("b"), at(60));
        log.append_at(draft("c"), at(120));

        let ids: Vec<EventId> = log.created_at_or_after(at(60)).iter().map(|e| e.id).collect();
        assert_eq!(ids, [2, 3]);
        assert!(log.created_at_or_after(at(121)).is_empty());
        assert_eq!(log.created_at_or_after(at(0) - Duration::days(1)).len(), 3);
    }

    #[test]
    fn test_filter_from_string() {
        let mut log = EventLog::new();
        log.append_at(draft("a"), Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap());
        log.append_at(draft("b"), Utc.with_ymd_and_hms(2024, 1, 3, 0, 0, 0).unwrap());

        let hits = log.filter_created_at_or_after("2024-01-02").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].action, "b");

        assert!(matches!(
            log.filter_created_at_or_after("yesterday"),
            Err(RewindError::InvalidFilter { .. })
        ));
    }

    #[test]
    fn test_get_out_of_range() {
        let mut log = EventLog::new();
        log.append(draft("a"));
        assert!(log.get(0).is_none());
        assert!(log.get(2).is_none());
        assert!(log.get(-5).is_none());
        assert!(log.get(1).is_some());
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::direction::PatchDirection;
use super::entity::EntityId;
use crate::patch::Patch;

/// 1-based, gap-free position of an event in the log
pub type EventId = i64;

/// An immutable record of one committed mutation.
///
/// `forward_patch` turns the pre-mutation state into the post-mutation
/// state; `inverse_patch` undoes it. Both are sanitized before the event
/// is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub created_at: DateTime<Utc>,
    pub entity_id: EntityId,
    pub initiator: String,
    pub subject: String,
    pub action: String,
    #[serde(rename = "update")]
    pub forward_patch: Patch,
    #[serde(rename = "rollback")]
    pub inverse_patch: Patch,
}

impl Event {
    /// The patch replayed for `direction`
    pub fn patch_for(&self, direction: PatchDirection) -> &Patch {
        match direction {
            PatchDirection::Forward => &self.forward_patch,
            PatchDirection::Inverse => &self.inverse_patch,
        }
    }
}

/// Everything an event carries except what the log assigns (id, timestamp)
#[derive(Debug, Clone, PartialEq)]
pub struct EventDraft {
    pub entity_id: EntityId,
    pub initiator: String,
    pub subject: String,
    pub action: String,
    pub forward_patch: Patch,
    pub inverse_patch: Patch,
}

impl EventDraft {
    pub(crate) fn into_event(self, id: EventId, created_at: DateTime<Utc>) -> Event {
        Event {
            id,
            created_at,
            entity_id: self.entity_id,
            initiator: self.initiator,
            subject: self.subject,
            action: self.action,
            forward_patch: self.forward_patch,
            inverse_patch: self.inverse_patch,
        }
    }
}

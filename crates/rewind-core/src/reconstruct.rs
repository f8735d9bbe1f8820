//! Reconstruction fold: replay a chain of events against an entity.
//!
//! Inverse reconstruction starts from the current entity and undoes the
//! chain newest to oldest. Forward reconstruction starts from history: the
//! same inverse fold first yields the snapshot as of the chain's first
//! event, then the forward patches are replayed oldest to newest from it.
//!
//! Excluded paths are never replayed. Whatever the current entity holds
//! under them is carried into the result unchanged.

use serde_json::Value;

use crate::errors::{Result, RewindError};
use crate::model::{Entity, Event, PatchDirection};
use crate::patch::diff::to_tree;
use crate::patch::{apply, sanitize, JsonPointer};

/// Fold `chain` into `start` using the patches for `direction`.
///
/// Inverse patches are applied newest to oldest, forward patches oldest
/// to newest. Each patch is sanitized against `excluded` first.
///
/// # Errors
///
/// `PatchApply` carrying the id of the first event whose patch does not
/// resolve, or `PatchDecode` if a stored patch is rejected by the decoder.
pub fn replay(
    start: Value,
    chain: &[Event],
    direction: PatchDirection,
    excluded: &[JsonPointer],
) -> Result<Value> {
    let step = |value: Value, event: &Event| -> Result<Value> {
        let patch = sanitize(event.patch_for(direction), excluded);
        apply(&value, &patch).map_err(|e| e.at_event(event.id))
    };

    match direction {
        PatchDirection::Inverse => chain.iter().rev().try_fold(start, step),
        PatchDirection::Forward => chain.iter().try_fold(start, step),
    }
}

/// Reconstruct `current` through `chain` in `direction`.
///
/// `chain` must be ascending and hold only events recorded for `current`.
///
/// # Errors
///
/// - `Encoding` if `current` cannot be serialized
/// - `PatchApply` / `PatchDecode` from [`replay`]
/// - `Decode` if the folded value is not a valid `E` (for instance when
///   the chain reaches back past the entity's creation)
pub fn reconstruct<E: Entity>(
    current: &E,
    chain: &[Event],
    direction: PatchDirection,
    excluded: &[JsonPointer],
) -> Result<E> {
    let start = to_tree(current)?;

    let snapshot = replay(start.clone(), chain, PatchDirection::Inverse, excluded)?;
    let mut folded = match direction {
        PatchDirection::Inverse => snapshot,
        PatchDirection::Forward => replay(snapshot, chain, PatchDirection::Forward, excluded)?,
    };

    carry_excluded(&start, &mut folded, excluded);

    serde_json::from_value(folded).map_err(|e| RewindError::Decode {
        reason: e.to_string(),
    })
}

fn carry_excluded(current: &Value, folded: &mut Value, excluded: &[JsonPointer]) {
    for pointer in excluded {
        let Some((last, parent)) = pointer.segments().split_last() else {
            continue;
        };
        let parent = JsonPointer::from_segments(parent.iter().cloned()).to_string();
        let Some(Value::Object(target)) = folded.pointer_mut(&parent) else {
            continue;
        };
        match current.pointer(&pointer.to_string()) {
            Some(value) => {
                target.insert(last.clone(), value.clone());
            }
            None => {
                target.remove(last);
            }
        }
    }
}

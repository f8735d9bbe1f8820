//! Diff engine: one structural walk yields both patch directions.
//!
//! For every difference found the walker emits the forward operation and
//! its inverse together, so the rollback patch never needs a second
//! comparison.
//!
//! - key only in `after`: `add` / `remove`
//! - key only in `before`: `remove` / `add(old)`
//! - scalar or type change: `replace(new)` / `replace(old)`
//! - arrays of equal length: compared index by index
//! - arrays of different length: replaced whole
//!
//! Array lengths never change through an element-level operation, so the
//! emitted paths stay valid regardless of the order they are applied in.

use crate::errors::{Result, RewindError};
use crate::patch::model::{Patch, PatchOperation};
use crate::patch::pointer::JsonPointer;
use serde::Serialize;
use serde_json::Value;

/// Forward and inverse patches between two states.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PatchPair {
    /// before -> after
    pub forward: Patch,
    /// after -> before
    pub inverse: Patch,
}

impl PatchPair {
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty() && self.inverse.is_empty()
    }
}

/// Serialize both values and diff their tree forms.
///
/// # Errors
///
/// `Encoding` if either value cannot be serialized.
pub fn diff<B, A>(before: &B, after: &A) -> Result<PatchPair>
where
    B: Serialize + ?Sized,
    A: Serialize + ?Sized,
{
    let before = to_tree(before)?;
    let after = to_tree(after)?;
    Ok(diff_values(&before, &after))
}

/// Diff two JSON trees.
pub fn diff_values(before: &Value, after: &Value) -> PatchPair {
    let mut forward = Vec::new();
    let mut inverse = Vec::new();
    walk(&JsonPointer::root(), before, after, &mut forward, &mut inverse);
    inverse.reverse();
    PatchPair {
        forward: Patch::new(forward),
        inverse: Patch::new(inverse),
    }
}

pub(crate) fn to_tree<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| RewindError::Encoding {
        reason: e.to_string(),
    })
}

fn walk(
    path: &JsonPointer,
    before: &Value,
    after: &Value,
    forward: &mut Vec<PatchOperation>,
    inverse: &mut Vec<PatchOperation>,
) {
    if before == after {
        return;
    }

    match (before, after) {
        (Value::Object(old), Value::Object(new)) => {
            for (key, old_value) in old {
                let child = path.child(key.as_str());
                match new.get(key) {
                    Some(new_value) => walk(&child, old_value, new_value, forward, inverse),
                    None => {
                        forward.push(PatchOperation::Remove {
                            path: child.clone(),
                        });
                        inverse.push(PatchOperation::Add {
                            path: child,
                            value: old_value.clone(),
                        });
                    }
                }
            }
            for (key, new_value) in new {
                if old.contains_key(key) {
                    continue;
                }
                let child = path.child(key.as_str());
                forward.push(PatchOperation::Add {
                    path: child.clone(),
                    value: new_value.clone(),
                });
                inverse.push(PatchOperation::Remove { path: child });
            }
        }
        (Value::Array(old), Value::Array(new)) if old.len() == new.len() => {
            for (index, (old_item, new_item)) in old.iter().zip(new).enumerate() {
                walk(&path.child(index.to_string()), old_item, new_item, forward, inverse);
            }
        }
        _ => {
            forward.push(PatchOperation::Replace {
                path: path.clone(),
                value: after.clone(),
            });
            inverse.push(PatchOperation::Replace {
                path: path.clone(),
                value: before.clone(),
            });
        }
    }
}

//! Patch application primitive.
//!
//! Operations are executed by the `json-patch` crate. The typed patch is
//! re-encoded and decoded through that crate's RFC 6902 model so whatever
//! it accepts is exactly what external tooling would accept. Each call
//! works on a private copy of the input: on failure the copy is discarded
//! and no partially patched value escapes.

use crate::errors::{Result, RewindError};
use crate::patch::model::Patch;
use serde_json::Value;

/// Apply `patch` to `value`, returning the patched value.
///
/// Every operation resolves against the result of the ones before it.
///
/// # Errors
///
/// - `Encoding` if the typed patch cannot be serialized
/// - `PatchDecode` if the standard decoder rejects the operation sequence
/// - `PatchApply` if any operation does not resolve (missing path, failed test)
pub fn apply(value: &Value, patch: &Patch) -> Result<Value> {
    if patch.is_empty() {
        return Ok(value.clone());
    }

    let encoded = serde_json::to_value(patch).map_err(|e| RewindError::Encoding {
        reason: e.to_string(),
    })?;
    let operations: json_patch::Patch =
        serde_json::from_value(encoded).map_err(|e| RewindError::PatchDecode {
            reason: e.to_string(),
        })?;

    let mut working = value.clone();
    json_patch::patch(&mut working, &operations.0).map_err(|e| RewindError::PatchApply {
        event_id: None,
        reason: e.to_string(),
    })?;
    Ok(working)
}

/// Byte-level form of [`apply`]: decode the value and the patch, apply, re-encode.
///
/// # Errors
///
/// - `Decode` if `value` is not JSON
/// - `PatchDecode` if `patch` is not a well-formed operation sequence
/// - `PatchApply` if an operation does not resolve
/// - `Encoding` if the result cannot be serialized
pub fn apply_patch(value: &[u8], patch: &[u8]) -> Result<Vec<u8>> {
    let document: Value = serde_json::from_slice(value).map_err(|e| RewindError::Decode {
        reason: e.to_string(),
    })?;
    let patch = Patch::from_slice(patch)?;
    let patched = apply(&document, &patch)?;
    serde_json::to_vec(&patched).map_err(|e| RewindError::Encoding {
        reason: e.to_string(),
    })
}

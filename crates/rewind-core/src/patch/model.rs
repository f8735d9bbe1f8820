//! Structural patch types.
//!
//! The wire form is a JSON array of RFC 6902 operations:
//! `[{"op":"replace","path":"/age","value":17}]`.

use crate::errors::{Result, RewindError};
use crate::patch::pointer::JsonPointer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One structural patch operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum PatchOperation {
    Add { path: JsonPointer, value: Value },
    Remove { path: JsonPointer },
    Replace { path: JsonPointer, value: Value },
    Move { from: JsonPointer, path: JsonPointer },
    Copy { from: JsonPointer, path: JsonPointer },
    Test { path: JsonPointer, value: Value },
}

impl PatchOperation {
    /// Target path of the operation
    pub fn path(&self) -> &JsonPointer {
        match self {
            PatchOperation::Add { path, .. }
            | PatchOperation::Remove { path }
            | PatchOperation::Replace { path, .. }
            | PatchOperation::Move { path, .. }
            | PatchOperation::Copy { path, .. }
            | PatchOperation::Test { path, .. } => path,
        }
    }

    /// Source path for move/copy
    pub fn from(&self) -> Option<&JsonPointer> {
        match self {
            PatchOperation::Move { from, .. } | PatchOperation::Copy { from, .. } => Some(from),
            _ => None,
        }
    }

    /// Carried value for add/replace/test
    pub fn value(&self) -> Option<&Value> {
        match self {
            PatchOperation::Add { value, .. }
            | PatchOperation::Replace { value, .. }
            | PatchOperation::Test { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Lowercase operation name as it appears on the wire
    pub fn kind(&self) -> &'static str {
        match self {
            PatchOperation::Add { .. } => "add",
            PatchOperation::Remove { .. } => "remove",
            PatchOperation::Replace { .. } => "replace",
            PatchOperation::Move { .. } => "move",
            PatchOperation::Copy { .. } => "copy",
            PatchOperation::Test { .. } => "test",
        }
    }
}

/// An ordered sequence of patch operations.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Patch(Vec<PatchOperation>);

impl Patch {
    pub fn new(operations: Vec<PatchOperation>) -> Self {
        Self(operations)
    }

    pub fn operations(&self) -> &[PatchOperation] {
        &self.0
    }

    pub fn into_operations(self) -> Vec<PatchOperation> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PatchOperation> {
        self.0.iter()
    }

    /// Decode a patch from its JSON bytes.
    ///
    /// # Errors
    ///
    /// `PatchDecode` if the bytes are not a well-formed operation array.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| RewindError::PatchDecode {
            reason: e.to_string(),
        })
    }

    /// Decode a patch from an already-parsed JSON value.
    ///
    /// # Errors
    ///
    /// `PatchDecode` if the value is not a well-formed operation array.
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| RewindError::PatchDecode {
            reason: e.to_string(),
        })
    }

    /// Encode the patch as JSON bytes.
    ///
    /// # Errors
    ///
    /// `Encoding` if serialization fails.
    pub fn to_vec(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| RewindError::Encoding {
            reason: e.to_string(),
        })
    }
}

impl FromIterator<PatchOperation> for Patch {
    fn from_iter<I: IntoIterator<Item = PatchOperation>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Patch {
    type Item = &'a PatchOperation;
    type IntoIter = std::slice::Iter<'a, PatchOperation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

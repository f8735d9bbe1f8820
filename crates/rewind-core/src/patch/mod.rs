//! Structural patches: model, diff, sanitize, apply.
//!
//! ```
//! use rewind_core::patch::{apply, diff_values, sanitize, JsonPointer};
//! use serde_json::json;
//!
//! let before = json!({"id": 1, "age": 16, "bag": {"phone": "1"}});
//! let after = json!({"id": 1, "age": 17, "bag": {"phone": "2"}});
//!
//! let pair = diff_values(&before, &after);
//! let excluded = [JsonPointer::parse("/bag").unwrap()];
//! let inverse = sanitize(&pair.inverse, &excluded);
//!
//! let restored = apply(&after, &inverse).unwrap();
//! assert_eq!(restored, json!({"id": 1, "age": 16, "bag": {"phone": "2"}}));
//! ```

pub mod apply;
pub mod diff;
pub mod model;
pub mod pointer;
pub mod sanitize;

pub use apply::{apply, apply_patch};
pub use diff::{diff, diff_values, PatchPair};
pub use model::{Patch, PatchOperation};
pub use pointer::JsonPointer;
pub use sanitize::sanitize;

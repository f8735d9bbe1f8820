//! Sensitive data marker for automatic redaction
//!
//! The `Sensitive<T>` wrapper keeps values such as phone numbers out of
//! `Debug`/`Display` output. Serialization is transparent, so a wrapped
//! field still round-trips through JSON exactly like the bare value.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Wrapper for sensitive data that redacts itself in Debug and Display
///
/// # Example
///
/// ```
/// use rewind_core_types::Sensitive;
///
/// let phone = Sensitive::new("+1-555-0100");
/// println!("{:?}", phone); // Prints: ***REDACTED***
/// println!("{}", phone);   // Prints: ***REDACTED***
///
/// assert_eq!(phone.expose(), &"+1-555-0100");
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
    /// Wrap a sensitive value
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Expose the underlying sensitive value
    pub fn expose(&self) -> &T {
        &self.0
    }

    /// Consume the wrapper and return the inner value
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "***REDACTED***")
    }
}

impl<T> fmt::Display for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "***REDACTED***")
    }
}

impl<T> From<T> for Sensitive<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

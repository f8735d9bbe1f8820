//! RFC 6901 JSON pointers as parsed segment lists.
//!
//! Paths are compared segment by segment, never as strings, so `/bag`
//! covers `/bag/phone` but not `/bagel`.

use crate::errors::{Result, RewindError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A parsed JSON pointer. The empty pointer addresses the whole document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct JsonPointer {
    segments: Vec<String>,
}

impl JsonPointer {
    /// The root pointer (`""`)
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a pointer string.
    ///
    /// # Errors
    ///
    /// `InvalidPointer` if the string is non-empty and does not start with
    /// `/`, or contains a `~` not followed by `0` or `1`.
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            return Ok(Self::root());
        }
        let rest = raw.strip_prefix('/').ok_or_else(|| RewindError::InvalidPointer {
            pointer: raw.to_string(),
            reason: "must be empty or start with '/'".to_string(),
        })?;

        let segments = rest
            .split('/')
            .map(|token| unescape(token, raw))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { segments })
    }

    /// Pointer from already-unescaped segments
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Pointer one level deeper
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    /// True if `prefix` equals this pointer or is one of its ancestors.
    pub fn starts_with(&self, prefix: &JsonPointer) -> bool {
        self.segments.starts_with(&prefix.segments)
    }

    /// Segments of `descendant` below this pointer, if it is a strict descendant.
    pub fn relative_segments<'a>(&self, descendant: &'a JsonPointer) -> Option<&'a [String]> {
        if descendant.segments.len() > self.segments.len() && descendant.starts_with(self) {
            Some(&descendant.segments[self.segments.len()..])
        } else {
            None
        }
    }
}

fn unescape(token: &str, raw: &str) -> Result<String> {
    let mut out = String::with_capacity(token.len());
    let mut chars = token.chars();
    while let Some(c) = chars.next() {
        if c != '~' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('0') => out.push('~'),
            Some('1') => out.push('/'),
            _ => {
                return Err(RewindError::InvalidPointer {
                    pointer: raw.to_string(),
                    reason: "'~' must be followed by '0' or '1'".to_string(),
                })
            }
        }
    }
    Ok(out)
}

impl fmt::Display for JsonPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "/{}", segment.replace('~', "~0").replace('/', "~1"))?;
        }
        Ok(())
    }
}

impl FromStr for JsonPointer {
    type Err = RewindError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for JsonPointer {
    type Error = RewindError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<JsonPointer> for String {
    fn from(pointer: JsonPointer) -> Self {
        pointer.to_string()
    }
}

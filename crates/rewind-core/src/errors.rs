use crate::model::{EntityId, EventId};
use thiserror::Error;

/// Result type alias using RewindError
pub type Result<T> = std::result::Result<T, RewindError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that the request layer can use
/// for programmatic handling (status codes, API responses) and that tests
/// assert on instead of message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Input
    InvalidInput,
    InvalidFilter,
    InvalidPointer,

    // Lookup
    NotFound,
    NoEvents,

    // Patch pipeline
    Encoding,
    PatchDecode,
    PatchApply,
    Decode,

    // Integration/IO
    Io,
    Config,
    Concurrency,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidFilter => "ERR_INVALID_FILTER",
            ExErrorKind::InvalidPointer => "ERR_INVALID_POINTER",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::NoEvents => "ERR_NO_EVENTS",
            ExErrorKind::Encoding => "ERR_ENCODING",
            ExErrorKind::PatchDecode => "ERR_PATCH_DECODE",
            ExErrorKind::PatchApply => "ERR_PATCH_APPLY",
            ExErrorKind::Decode => "ERR_DECODE",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Config => "ERR_CONFIG",
            ExErrorKind::Concurrency => "ERR_CONCURRENCY",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification (`kind`) for programmatic handling plus
/// optional context for debugging. Built with the `with_*` methods.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<EntityId>,
    event_id: Option<EventId>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            event_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context
    pub fn with_entity_id(mut self, id: EntityId) -> Self {
        self.entity_id = Some(id);
        self
    }

    /// Add event ID context
    pub fn with_event_id(mut self, id: EventId) -> Self {
        self.event_id = Some(id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity_id(&self) -> Option<EntityId> {
        self.entity_id
    }

    pub fn event_id(&self) -> Option<EventId> {
        self.event_id
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        if let Some(event_id) = self.event_id {
            write!(f, " (event_id: {})", event_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|s| s as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Error taxonomy for Rewind operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RewindError {
    // ===== Patch pipeline =====
    /// A value could not be serialized to its tree representation
    #[error("Encoding failed: {reason}")]
    Encoding { reason: String },

    /// Patch bytes are not a well-formed operation sequence
    #[error("Malformed patch: {reason}")]
    PatchDecode { reason: String },

    /// A patch operation did not resolve against the current value
    #[error("Patch could not be applied{}: {reason}", fmt_event(.event_id))]
    PatchApply {
        event_id: Option<EventId>,
        reason: String,
    },

    /// Final value does not fit the entity schema
    #[error("Decoding failed: {reason}")]
    Decode { reason: String },

    // ===== Lookup =====
    /// Entity not present in the store
    #[error("Entity not found: {entity_id}")]
    EntityNotFound { entity_id: EntityId },

    /// Event identifier out of range, or the log is empty
    #[error("No events from id {event_id} (log holds {event_count})")]
    NoEvents {
        event_id: EventId,
        event_count: usize,
    },

    // ===== Input =====
    /// Timestamp filter could not be parsed
    #[error("Invalid created_at filter '{input}': {reason}")]
    InvalidFilter { input: String, reason: String },

    /// Malformed JSON pointer
    #[error("Invalid JSON pointer '{pointer}': {reason}")]
    InvalidPointer { pointer: String, reason: String },

    /// Unknown patch direction
    #[error("Unknown patch direction '{value}' (expected update or rollback)")]
    InvalidDirection { value: String },

    /// Seed scenario failed validation
    #[error("Invalid seed: {reason}")]
    SeedValidation { reason: String },

    // ===== Integration =====
    /// Engine configuration rejected
    #[error("Invalid configuration: {reason}")]
    Config { reason: String },

    /// Filesystem failure
    #[error("I/O failure during {op}: {reason}")]
    Io { op: String, reason: String },

    /// The engine lock was poisoned by a panicking writer
    #[error("Engine state lock poisoned")]
    StatePoisoned,
}

fn fmt_event(event_id: &Option<EventId>) -> String {
    match event_id {
        Some(id) => format!(" at event {}", id),
        None => String::new(),
    }
}

impl RewindError {
    /// Attach the event whose patch failed, if not already recorded
    pub fn at_event(self, id: EventId) -> Self {
        match self {
            RewindError::PatchApply {
                event_id: None,
                reason,
            } => RewindError::PatchApply {
                event_id: Some(id),
                reason,
            },
            other => other,
        }
    }

    /// Shorthand for the canonical kind of this error
    pub fn kind(&self) -> ExErrorKind {
        ExError::from(self.clone()).kind()
    }
}

impl From<RewindError> for ExError {
    fn from(err: RewindError) -> Self {
        let message = err.to_string();
        match err {
            RewindError::Encoding { .. } => ExError::new(ExErrorKind::Encoding)
                .with_op("encode")
                .with_message(message),

            RewindError::PatchDecode { .. } => ExError::new(ExErrorKind::PatchDecode)
                .with_op("decode_patch")
                .with_message(message),

            RewindError::PatchApply { event_id, .. } => {
                let ex = ExError::new(ExErrorKind::PatchApply)
                    .with_op("apply_patch")
                    .with_message(message);
                match event_id {
                    Some(id) => ex.with_event_id(id),
                    None => ex,
                }
            }

            RewindError::Decode { .. } => ExError::new(ExErrorKind::Decode)
                .with_op("decode_entity")
                .with_message(message),

            RewindError::EntityNotFound { entity_id } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(entity_id)
                .with_message("Entity not found"),

            RewindError::NoEvents { event_id, .. } => ExError::new(ExErrorKind::NoEvents)
                .with_op("range_from")
                .with_event_id(event_id)
                .with_message(message),

            RewindError::InvalidFilter { .. } => ExError::new(ExErrorKind::InvalidFilter)
                .with_op("filter_events")
                .with_message(message),

            RewindError::InvalidPointer { .. } => {
                ExError::new(ExErrorKind::InvalidPointer).with_message(message)
            }

            RewindError::InvalidDirection { .. } | RewindError::SeedValidation { .. } => {
                ExError::new(ExErrorKind::InvalidInput).with_message(message)
            }

            RewindError::Config { .. } => ExError::new(ExErrorKind::Config)
                .with_op("load_config")
                .with_message(message),

            RewindError::Io { op, .. } => ExError::new(ExErrorKind::Io)
                .with_op(op)
                .with_message(message),

            RewindError::StatePoisoned => {
                ExError::new(ExErrorKind::Concurrency).with_message(message)
            }
        }
    }
}

impl<T> From<std::sync::PoisonError<T>> for RewindError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        RewindError::StatePoisoned
    }
}

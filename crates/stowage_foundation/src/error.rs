//! Error types for the Stowage system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//! Cache misses are not errors; only contract violations end up here.

use std::fmt;

use thiserror::Error;

use crate::entity::EntityId;
use crate::types::ValueType;

/// Result alias used throughout Stowage.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Stowage operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a cache type mismatch error.
    #[must_use]
    pub fn type_mismatch(
        entity: EntityId,
        key: impl Into<String>,
        expected: ValueType,
        actual: ValueType,
    ) -> Self {
        Self::new(ErrorKind::TypeMismatch {
            entity,
            key: key.into(),
            expected,
            actual,
        })
    }

    /// Creates an unresolved process definition error.
    #[must_use]
    pub fn unresolved_definition(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnresolvedDefinition(name.into()))
    }

    /// Creates an unknown process error.
    #[must_use]
    pub fn unknown_process(entity: EntityId, process: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownProcess {
            entity,
            process: process.into(),
        })
    }

    /// Returns true if this error was caused by a missing process definition.
    #[must_use]
    pub fn is_unresolved_definition(&self) -> bool {
        matches!(self.kind, ErrorKind::UnresolvedDefinition(_))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A typed cache read found a value of another type.
    #[error("type mismatch for {entity} key {key:?}: expected {expected}, got {actual}")]
    TypeMismatch {
        /// The entity whose cache was read.
        entity: EntityId,
        /// The cache key that was read.
        key: String,
        /// The type the caller asked for.
        expected: ValueType,
        /// The type actually stored.
        actual: ValueType,
    },

    /// A process definition could not be found in the catalog.
    #[error("unresolved process definition: {0}")]
    UnresolvedDefinition(String),

    /// A contribution targeted a process the entity does not track.
    #[error("unknown process {process:?} on {entity}")]
    UnknownProcess {
        /// The entity that was addressed.
        entity: EntityId,
        /// The process name that was not found.
        process: String,
    },

    /// Serialization or deserialization failed.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// File I/O failed.
    #[error("io error: {0}")]
    IoError(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The entity being processed, if any.
    pub entity: Option<EntityId>,
    /// The tick during which the error occurred.
    pub tick: Option<u64>,
    /// Call path, outermost first.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the entity.
    #[must_use]
    pub fn with_entity(mut self, entity: EntityId) -> Self {
        self.entity = Some(entity);
        self
    }

    /// Sets the tick number.
    #[must_use]
    pub fn with_tick(mut self, tick: u64) -> Self {
        self.tick = Some(tick);
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(entity) = &self.entity {
            write!(f, "on {entity}")?;
        }
        if let Some(tick) = self.tick {
            write!(f, " at tick {tick}")?;
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  in {frame}")?;
            }
        }
        Ok(())
    }
}

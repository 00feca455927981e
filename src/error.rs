//! Error types for Gridlock
//!
//! Uses `thiserror` for library errors. Binaries and commands wrap these in
//! `anyhow` at the boundary.

use std::fmt;
use thiserror::Error;

/// Result type alias for Gridlock operations
pub type GridlockResult<T> = Result<T, GridlockError>;

/// Which kind of entity an id refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Process,
    Resource,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Process => write!(f, "process"),
            EntityKind::Resource => write!(f, "resource"),
        }
    }
}

/// Main error type for Gridlock operations
#[derive(Error, Debug)]
pub enum GridlockError {
    /// Creation conflict: the id is already taken
    #[error("{kind} '{id}' already exists")]
    DuplicateId { kind: EntityKind, id: String },

    /// Reference to an id absent from the current matrix
    #[error("{kind} '{id}' not found")]
    NotFound { kind: EntityKind, id: String },

    /// Strict allocation mode only: the requested units exceed remaining capacity
    ///
    /// The lenient path (`ResourceManager::update_allocation`) clamps silently
    /// instead of returning this.
    #[error("allocating {requested} of '{resource}' exceeds remaining capacity ({available} left)")]
    CapacityExceeded {
        resource: String,
        requested: u32,
        available: u32,
    },

    /// Structurally valid scenario file that violates model invariants
    #[error("invalid scenario: {message}")]
    InvalidScenario { message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

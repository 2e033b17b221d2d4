use super::types::Field;
use crate::persistence::PersistenceError;
use thiserror::Error;

/// A field value rejected by the domain rules
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid {field}: {reason}")]
pub struct ValidationError {
    pub field: Field,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: Field, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Main error type for roster operations
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("Roll No already exists: {0}")]
    DuplicateKey(String),

    #[error("Student not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Field cannot be updated: {0}")]
    ReadOnlyField(Field),

    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}

impl RosterError {
    /// True when memory holds changes the backing file does not.
    pub fn needs_save(&self) -> bool {
        matches!(self, Self::Persistence(_))
    }
}

/// Result type alias for roster operations
pub type Result<T> = std::result::Result<T, RosterError>;

use crate::core::ValidationError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Persistence error types
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    IOError(#[from] std::io::Error),

    #[error("Malformed record at line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },

    #[error("Invalid record at line {line}: {source}")]
    InvalidRecord {
        line: usize,
        #[source]
        source: ValidationError,
    },
}

pub type Result<T> = std::result::Result<T, PersistenceError>;

/// Flat file storage configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StorageConfig {
    /// Backing file, rewritten in full after every mutation
    pub path: PathBuf,
    /// Reject persisted records that break the marks/contact rules
    pub validate_on_load: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("students.txt"),
            validate_on_load: true,
        }
    }
}

impl StorageConfig {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }
}

pub mod config;
pub mod core;
pub mod persistence;
pub mod roster;

// Re-export commonly used types
pub use crate::config::{LoggingConfig, RosterConfig};
pub use crate::core::{
    Field, FieldUpdate, Grade, RecordStore, RosterError, Student, ValidationError, validation,
};
pub use crate::persistence::{FlatFile, PersistenceError, StorageConfig};
pub use crate::roster::Roster;

pub mod error;
pub mod record_store;
pub mod types;
pub mod validation;

pub use error::{RosterError, ValidationError};
pub use record_store::RecordStore;
pub use types::{Field, FieldUpdate, Grade, Student};

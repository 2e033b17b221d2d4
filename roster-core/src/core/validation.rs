//! Field validation rules
//!
//! Marks and contact are the only domain rules. Text fields are free-form
//! apart from characters the flat file format cannot carry.

use super::error::ValidationError;
use super::types::Field;

pub const MIN_MARKS: f64 = 0.0;
pub const MAX_MARKS: f64 = 100.0;
pub const CONTACT_DIGITS: usize = 10;

/// Characters that would break the one-record-per-line, comma-delimited format
const RESERVED_CHARS: [char; 3] = [',', '\n', '\r'];

pub fn is_valid_marks(marks: f64) -> bool {
    (MIN_MARKS..=MAX_MARKS).contains(&marks)
}

pub fn is_valid_contact(contact: &str) -> bool {
    contact.len() == CONTACT_DIGITS && contact.bytes().all(|b| b.is_ascii_digit())
}

pub fn validate_marks(marks: f64) -> Result<(), ValidationError> {
    if is_valid_marks(marks) {
        Ok(())
    } else {
        Err(ValidationError::new(
            Field::Marks,
            format!("{} is outside {}-{}", marks, MIN_MARKS, MAX_MARKS),
        ))
    }
}

/// Parse user-entered marks and check the range
pub fn parse_marks(input: &str) -> Result<f64, ValidationError> {
    let marks = input
        .trim()
        .parse::<f64>()
        .map_err(|_| ValidationError::new(Field::Marks, format!("'{}' is not a number", input)))?;
    validate_marks(marks)?;
    Ok(marks)
}

pub fn validate_contact(contact: &str) -> Result<(), ValidationError> {
    if is_valid_contact(contact) {
        Ok(())
    } else {
        Err(ValidationError::new(
            Field::Contact,
            format!("'{}' must be exactly {} digits", contact, CONTACT_DIGITS),
        ))
    }
}

pub fn validate_text(field: Field, value: &str) -> Result<(), ValidationError> {
    if let Some(c) = value.chars().find(|c| RESERVED_CHARS.contains(c)) {
        return Err(ValidationError::new(
            field,
            format!("{:?} cannot be stored in the data file", c),
        ));
    }
    Ok(())
}

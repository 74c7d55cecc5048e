//! Input validation utilities.
//!
//! Validation happens once, when an entity is constructed or a field is set. Nothing
//! is re-validated on read.

use crate::constants::{MAX_PATIENT_AGE, MIN_PATIENT_AGE};
use hms_types::NonEmptyText;

/// A malformed or out-of-range field.
///
/// These never reach disk: the attempted record is discarded and the caller retries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} required")]
    MissingField(&'static str),
    #[error(
        "invalid age {0}: must be between {min} and {max}",
        min = MIN_PATIENT_AGE,
        max = MAX_PATIENT_AGE
    )]
    AgeOutOfRange(i32),
    #[error("unknown role '{0}' (expected Admin, Doctor, Nurse or Receptionist)")]
    UnknownRole(String),
    #[error("{field} must be in {pattern} format, got '{value}'")]
    InvalidDate {
        field: &'static str,
        pattern: &'static str,
        value: String,
    },
}

pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

/// Validates a required text field, returning it trimmed.
///
/// # Errors
///
/// Returns [`ValidationError::MissingField`] naming `field` if `value` is blank.
pub fn required(field: &'static str, value: &str) -> ValidationResult<NonEmptyText> {
    NonEmptyText::new(value).map_err(|_| ValidationError::MissingField(field))
}

/// Validates a patient's age in whole years.
pub fn patient_age(age: i32) -> ValidationResult<u8> {
    if !(MIN_PATIENT_AGE..=MAX_PATIENT_AGE).contains(&age) {
        return Err(ValidationError::AgeOutOfRange(age));
    }
    u8::try_from(age).map_err(|_| ValidationError::AgeOutOfRange(age))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_names_the_field() {
        assert_eq!(
            required("contact", "  ").unwrap_err(),
            ValidationError::MissingField("contact")
        );
        assert_eq!(required("id", " P001 ").unwrap().as_str(), "P001");
    }

    #[test]
    fn age_bounds_are_inclusive() {
        assert_eq!(patient_age(0), Ok(0));
        assert_eq!(patient_age(150), Ok(150));
        assert_eq!(patient_age(-1), Err(ValidationError::AgeOutOfRange(-1)));
        assert_eq!(patient_age(151), Err(ValidationError::AgeOutOfRange(151)));
    }

    #[test]
    fn messages_are_user_facing() {
        assert_eq!(
            ValidationError::MissingField("name").to_string(),
            "name required"
        );
        assert_eq!(
            ValidationError::AgeOutOfRange(200).to_string(),
            "invalid age 200: must be between 0 and 150"
        );
    }
}

//! Validation utilities.

use crate::RosterError;
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns a `RosterError` on failure.
    fn validate_request(&self) -> Result<(), RosterError> {
        self.validate().map_err(validation_errors_to_roster_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Converts `validator::ValidationErrors` to `RosterError`.
///
/// Field errors are sorted by field name so the message is stable.
#[must_use]
pub fn validation_errors_to_roster_error(errors: ValidationErrors) -> RosterError {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                let message = error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), ToString::to_string);
                format!("{}: {}", field, message)
            })
        })
        .collect();
    messages.sort();

    RosterError::Validation(messages.join("; "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Debug, Validate)]
    struct Sample {
        #[validate(length(min = 1, message = "must not be empty"))]
        name: String,
        #[validate(length(min = 1, message = "must not be empty"))]
        email: String,
    }

    #[test]
    fn test_validate_request_collects_fields() {
        let sample = Sample {
            name: String::new(),
            email: String::new(),
        };
        let err = sample.validate_request().unwrap_err();
        match err {
            RosterError::Validation(msg) => {
                assert_eq!(msg, "email: must not be empty; name: must not be empty");
            }
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_request_ok() {
        let sample = Sample {
            name: "a".to_string(),
            email: "b".to_string(),
        };
        assert!(sample.validate_request().is_ok());
    }
}

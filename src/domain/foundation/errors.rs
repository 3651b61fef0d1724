//! Error types for the domain layer.

use thiserror::Error;

/// Errors raised when a caller violates an input contract.
///
/// This is the only error class the evaluation core produces: malformed
/// input fails fast here, and everything downstream operates on values
/// that have already been validated to their declared ranges.
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: f64,
        max: f64,
        actual: f64,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField {
            field: field.into(),
        }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: f64, max: f64, actual: f64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_field_displays_correctly() {
        let err = ValidationError::empty_field("title");
        assert_eq!(format!("{}", err), "Field 'title' cannot be empty");
    }

    #[test]
    fn out_of_range_displays_correctly() {
        let err = ValidationError::out_of_range("confidence", 0.0, 1.0, 1.5);
        assert_eq!(
            format!("{}", err),
            "Field 'confidence' must be between 0 and 1, got 1.5"
        );
    }

    #[test]
    fn invalid_format_displays_correctly() {
        let err = ValidationError::invalid_format("rule", "all predicates unset");
        assert_eq!(
            format!("{}", err),
            "Field 'rule' has invalid format: all predicates unset"
        );
    }
}

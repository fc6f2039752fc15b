//! Error types for timetable construction.
//!
//! Infeasibility is never an error: a course that cannot be placed legally
//! still receives an assignment and the problem shows up as hard
//! violations in the result.

use thiserror::Error;

use crate::validation::ValidationError;

/// Result type alias for timetable operations.
pub type Result<T> = std::result::Result<T, TimetableError>;

/// Errors surfaced to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimetableError {
    /// Input data failed structural validation (client-input fault).
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Fatal failure inside the search engine, not attributable to input shape.
    #[error("Engine fault: {0}")]
    Engine(String),
}

impl TimetableError {
    /// Folds a list of validation errors into a single `MalformedInput`.
    pub fn from_validation(errors: &[ValidationError]) -> Self {
        let joined = errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        Self::MalformedInput(joined)
    }

    /// Whether this error is caused by the caller's input.
    pub fn is_client_fault(&self) -> bool {
        matches!(self, Self::MalformedInput(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_from_validation_joins_messages() {
        let errors = vec![
            ValidationError::new(ValidationErrorKind::EmptyCollection, "No rooms"),
            ValidationError::new(ValidationErrorKind::UnknownTeacher, "Course 3 has no teacher"),
        ];
        let err = TimetableError::from_validation(&errors);
        assert_eq!(
            err,
            TimetableError::MalformedInput("No rooms; Course 3 has no teacher".into())
        );
        assert!(err.is_client_fault());
    }

    #[test]
    fn test_display() {
        let err = TimetableError::Engine("fitness overflow".into());
        assert_eq!(err.to_string(), "Engine fault: fitness overflow");
        assert!(!err.is_client_fault());
    }
}

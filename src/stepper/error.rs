//! The single failure mode of the stepper: a rejected step transition.

use thiserror::Error;

/// A field-level validation message, addressed to whatever form control
/// produced it so the step surface can render it next to the right input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Raised by a step transition when the step's pending form data does not
/// validate. The stepper propagates it unchanged and leaves its state intact,
/// so the user can correct the input and retry the same navigation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("step validation failed ({})", .errors.len())]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    /// A single message not tied to any particular field.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            errors: vec![FieldError::new("", message)],
        }
    }

    /// A single field-level message.
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            errors: vec![FieldError::new(field, message)],
        }
    }
}

impl From<Vec<FieldError>> for ValidationError {
    fn from(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }
}

//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),

    /// Unknown configuration value
    #[error("Invalid {kind}: {value}")]
    InvalidValue { kind: String, value: String },
}

impl DomainError {
    /// Create an invalid value error
    pub fn invalid_value(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            kind: kind.into(),
            value: value.into(),
        }
    }
}

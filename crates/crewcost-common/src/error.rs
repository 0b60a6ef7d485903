//! Error types for CrewCost
//!
//! Configuration problems are rejected before the engine runs. Gate
//! violations are not errors and never appear here.

use thiserror::Error;

/// Result type alias using CrewCostError
pub type Result<T> = std::result::Result<T, CrewCostError>;

/// Unified error type for CrewCost operations
#[derive(Debug, Error)]
pub enum CrewCostError {
    // Invalid configuration: unknown names, empty lists, out-of-range scalars
    #[error("Invalid {field} '{value}': {reason}")]
    InvalidInput {
        field: &'static str,
        value: String,
        reason: String,
    },

    // Configuration source errors (files, environment)
    #[error("Configuration error: {0}")]
    Config(String),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    // Report sink errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl CrewCostError {
    /// Build an invalid-input error for `field` carrying the offending value
    pub fn invalid(field: &'static str, value: impl ToString, reason: impl Into<String>) -> Self {
        CrewCostError::InvalidInput {
            field,
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Field name for invalid-input errors
    pub fn field(&self) -> Option<&'static str> {
        match self {
            CrewCostError::InvalidInput { field, .. } => Some(*field),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for CrewCostError {
    fn from(err: serde_json::Error) -> Self {
        CrewCostError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for CrewCostError {
    fn from(err: std::io::Error) -> Self {
        CrewCostError::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_display() {
        let err = CrewCostError::invalid("budget", "huge", "expected one of: low, medium, high");
        let text = err.to_string();
        assert!(text.contains("budget"));
        assert!(text.contains("huge"));
        assert_eq!(err.field(), Some("budget"));
    }

    #[test]
    fn test_config_error_has_no_field() {
        let err = CrewCostError::Config("missing file".to_string());
        assert!(err.field().is_none());
        assert!(err.to_string().contains("missing file"));
    }
}

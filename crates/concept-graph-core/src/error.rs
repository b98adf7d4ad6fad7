//! Error types for concept-graph-core.

use thiserror::Error;
use uuid::Uuid;

/// Top-level error type for concept-graph-core.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    #[error("Invalid embedding dimension: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Entity not found: {id}")]
    EntityNotFound { id: Uuid },

    #[error("Index error: {0}")]
    Index(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GraphError {
    /// Build a validation error for the given input field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        GraphError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for GraphError {
    fn from(err: serde_json::Error) -> Self {
        GraphError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for GraphError {
    fn from(err: config::ConfigError) -> Self {
        GraphError::Config(err.to_string())
    }
}

/// Result type alias for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display() {
        let err = GraphError::validation("relation", "must not be blank");
        assert!(err.to_string().contains("relation"));
        assert!(err.to_string().contains("must not be blank"));
    }

    #[test]
    fn test_dimension_mismatch_display() {
        let err = GraphError::DimensionMismatch {
            expected: 384,
            actual: 768,
        };
        assert!(err.to_string().contains("384"));
        assert!(err.to_string().contains("768"));
    }

    #[test]
    fn test_entity_not_found_display() {
        let err = GraphError::EntityNotFound { id: Uuid::nil() };
        assert!(err.to_string().contains("Entity not found"));
    }
}

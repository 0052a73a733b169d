//! Error types for the batch read engine
//!
//! Three failure classes, none of them retried:
//! - Configuration: rejected before any query executes
//! - MissingKey: the cursor cannot advance, iteration halts
//! - UnsupportedOperation: a write reached a read-only record
//!
//! Misconfiguration and malformed projections fail loudly; the engine
//! never produces a silently incomplete traversal.

use thiserror::Error;

/// Result type for read operations
pub type ReadResult<T> = Result<T, ReadError>;

/// Errors raised by the batch read engine
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReadError {
    /// Batch options combined with an explicit order or limit, or a
    /// non-positive batch size
    #[error("Invalid batch configuration: {0}")]
    Configuration(String),

    /// A non-empty batch's projection excludes the primary key, so the
    /// next cursor cannot be computed
    #[error("Primary key column `{column}` not included in the projection")]
    MissingKey {
        /// The schema's declared primary-key column
        column: String,
    },

    /// A write or persistence call reached a read-only record
    #[error("Unsupported operation on read-only record: {0}")]
    UnsupportedOperation(String),

    /// The executor failed to run a query
    #[error("Query execution failed: {0}")]
    Execution(String),
}

impl ReadError {
    /// Create a configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a missing key error for the given primary-key column
    pub fn missing_key(column: impl Into<String>) -> Self {
        Self::MissingKey {
            column: column.into(),
        }
    }

    /// Create an unsupported operation error
    pub fn unsupported(operation: impl Into<String>) -> Self {
        Self::UnsupportedOperation(operation.into())
    }

    /// Create an execution error
    pub fn execution(msg: impl Into<String>) -> Self {
        Self::Execution(msg.into())
    }

    /// True when the error was raised before any query executed
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_names_column() {
        let err = ReadError::missing_key("id");
        let display = format!("{}", err);
        assert!(display.contains("`id`"));
        assert!(display.contains("not included"));
    }

    #[test]
    fn test_configuration_classified() {
        assert!(ReadError::configuration("order given").is_configuration());
        assert!(!ReadError::missing_key("id").is_configuration());
    }

    #[test]
    fn test_unsupported_display() {
        let err = ReadError::unsupported("save");
        assert_eq!(
            format!("{}", err),
            "Unsupported operation on read-only record: save"
        );
    }
}

//! # Record Store Errors

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Record store errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No record with this identifier
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A record with this identifier already exists
    #[error("Record already exists: {0}")]
    AlreadyExists(String),

    /// Record could not be converted to or from the store representation
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// The backend rejected or failed the call
    #[error("Store operation '{operation}' failed: {message}")]
    Backend {
        operation: &'static str,
        message: String,
    },
}

impl StoreError {
    /// Wrap a backend failure
    pub fn backend(operation: &'static str, message: impl Into<String>) -> Self {
        StoreError::Backend {
            operation,
            message: message.into(),
        }
    }
}

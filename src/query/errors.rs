//! Errors raised while building store operations.

use thiserror::Error;

/// Result type for builder operations
pub type QueryResult<T> = Result<T, QueryError>;

/// Builder errors. All of them are caller mistakes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Update body carried no fields
    #[error("Update must contain at least one field")]
    EmptyUpdate,

    /// Update body tried to change the identifier
    #[error("Field '{0}' identifies the record and cannot be updated")]
    KeyInUpdate(String),
}

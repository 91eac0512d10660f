//! Cart errors

use thiserror::Error;

/// Errors from the cart manager and its backing store
#[derive(Debug, Error)]
pub enum CartError {
    #[error("Cart store error: {0}")]
    Store(String),

    #[error("Cart serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<redb::Error> for CartError {
    fn from(err: redb::Error) -> Self {
        Self::Store(err.to_string())
    }
}

impl From<redb::DatabaseError> for CartError {
    fn from(err: redb::DatabaseError) -> Self {
        Self::Store(err.to_string())
    }
}

impl From<redb::TransactionError> for CartError {
    fn from(err: redb::TransactionError) -> Self {
        Self::Store(err.to_string())
    }
}

impl From<redb::TableError> for CartError {
    fn from(err: redb::TableError) -> Self {
        Self::Store(err.to_string())
    }
}

impl From<redb::StorageError> for CartError {
    fn from(err: redb::StorageError) -> Self {
        Self::Store(err.to_string())
    }
}

impl From<redb::CommitError> for CartError {
    fn from(err: redb::CommitError) -> Self {
        Self::Store(err.to_string())
    }
}

/// Result type for cart operations
pub type CartResult<T> = Result<T, CartError>;

//! Unified domain error for the Mesa ordering core
//!
//! Every fallible operation in the order domain resolves to one of
//! these variants. The server maps them onto HTTP responses in
//! `utils/error.rs`; the cart crate surfaces them to the UI layer as
//! transient notifications. Nothing here retries automatically.

use thiserror::Error;

/// Domain error enumeration
///
/// | Variant | Meaning |
/// |---------|---------|
/// | Validation | Empty cart, missing ordering context, bad payload |
/// | InvalidState | Operation not allowed in the order's current status |
/// | Authorization | Caller lacks tenant access or session ownership |
/// | NotFound | Referenced table/order/menu item absent |
/// | Conflict | Revision precondition failed (lost-update detected) |
/// | Transport | Backing store or network failure |
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid order state: {0}")]
    InvalidState(String),

    #[error("Permission denied: {0}")]
    Authorization(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Transport(String),
}

impl DomainError {
    // ========== Convenient constructors ==========

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }

    pub fn authorization(message: impl Into<String>) -> Self {
        Self::Authorization(message.into())
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound(resource.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Stable machine-readable code, used in API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION",
            Self::InvalidState(_) => "INVALID_STATE",
            Self::Authorization(_) => "FORBIDDEN",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::Transport(_) => "TRANSPORT",
        }
    }
}

#[cfg(feature = "db")]
impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Self::NotFound("row not found".to_string()),
            other => Self::Transport(other.to_string()),
        }
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

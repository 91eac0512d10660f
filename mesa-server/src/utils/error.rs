//! Unified error handling
//!
//! [`AppError`] is the application-level error every handler returns.
//! Domain failures arrive as [`DomainError`] and are mapped onto HTTP
//! statuses here; auth failures have their own variants so middleware
//! can distinguish a missing token from an expired one.
//!
//! | Error | HTTP status |
//! |-------|-------------|
//! | Unauthorized / TokenExpired / InvalidToken | 401 |
//! | Forbidden, Domain(Authorization) | 403 |
//! | Domain(Validation) | 400 |
//! | Domain(InvalidState) | 422 |
//! | Domain(NotFound) | 404 |
//! | Domain(Conflict) | 409 |
//! | Domain(Transport), Internal | 500 |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use shared::{ApiResponse, DomainError};
use tracing::error;

/// Application error
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== Authentication (401) ==========
    #[error("Authentication required")]
    Unauthorized,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    // ========== Authorization (403) ==========
    #[error("Permission denied: {0}")]
    Forbidden(String),

    // ========== Domain ==========
    #[error(transparent)]
    Domain(#[from] DomainError),

    // ========== System (500) ==========
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn invalid_token(message: impl Into<String>) -> Self {
        Self::InvalidToken(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::Domain(DomainError::not_found(message))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Domain(DomainError::validation(message))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        Self::Domain(DomainError::validation(e.to_string()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", self.to_string())
            }
            AppError::TokenExpired => {
                (StatusCode::UNAUTHORIZED, "TOKEN_EXPIRED", self.to_string())
            }
            AppError::InvalidToken(_) => {
                (StatusCode::UNAUTHORIZED, "INVALID_TOKEN", self.to_string())
            }
            AppError::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN", self.to_string()),

            AppError::Domain(err) => {
                let status = match err {
                    DomainError::Validation(_) => StatusCode::BAD_REQUEST,
                    DomainError::InvalidState(_) => StatusCode::UNPROCESSABLE_ENTITY,
                    DomainError::Authorization(_) => StatusCode::FORBIDDEN,
                    DomainError::NotFound(_) => StatusCode::NOT_FOUND,
                    DomainError::Conflict(_) => StatusCode::CONFLICT,
                    DomainError::Transport(msg) => {
                        error!(target: "storage", error = %msg, "Storage error");
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                };
                // Storage details stay out of the response body
                let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
                    "Storage error".to_string()
                } else {
                    err.to_string()
                };
                (status, err.code(), message)
            }

            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ApiResponse::<()>::error(code, message));
        (status, body).into_response()
    }
}

/// Result type for handlers
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_map_to_expected_statuses() {
        let cases = [
            (DomainError::validation("x"), StatusCode::BAD_REQUEST),
            (
                DomainError::invalid_state("x"),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (DomainError::authorization("x"), StatusCode::FORBIDDEN),
            (DomainError::not_found("x"), StatusCode::NOT_FOUND),
            (DomainError::conflict("x"), StatusCode::CONFLICT),
            (
                DomainError::transport("x"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            let response = AppError::from(err).into_response();
            assert_eq!(response.status(), expected);
        }
    }

    #[test]
    fn test_auth_errors_are_401() {
        assert_eq!(
            AppError::Unauthorized.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::TokenExpired.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
    }
}

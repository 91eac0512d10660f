//! Auth middleware
//!
//! Two gates: admin routes require a valid JWT bearer token, customer
//! routes require a live table-session token. Both inject the
//! resolved identity into request extensions for handlers to extract.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::core::ServerState;
use crate::utils::AppError;

/// Header carrying the customer table-session token
pub const SESSION_TOKEN_HEADER: &str = "x-session-token";

/// Admin gate: validate `Authorization: Bearer <jwt>` and inject
/// [`CurrentUser`]
pub async fn require_admin(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = auth_header
        .and_then(JwtService::extract_from_header)
        .ok_or(AppError::Unauthorized)?;

    match state.jwt_service.validate_token(token) {
        Ok(claims) => {
            let user = CurrentUser::from(claims);
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(JwtError::ExpiredToken) => Err(AppError::TokenExpired),
        Err(e) => {
            tracing::warn!(error = %e, uri = %req.uri(), "Admin auth failed");
            Err(AppError::invalid_token("Invalid token"))
        }
    }
}

/// Customer gate: resolve the `x-session-token` header and inject
/// [`TableSession`](crate::auth::TableSession)
pub async fn require_session(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = req
        .headers()
        .get(SESSION_TOKEN_HEADER)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let session = state
        .sessions
        .resolve(token)
        .ok_or_else(|| AppError::invalid_token("Unknown or expired table session"))?;

    req.extensions_mut().insert(session);
    Ok(next.run(req).await)
}

//! Table session handlers

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::ApiResponse;

use crate::core::ServerState;
use crate::db::repository::DiningTableRepository;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    /// Table code from the scanned QR URL
    pub table_code: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub restaurant_id: String,
    pub table_id: String,
    pub table_name: String,
    pub expires_at: DateTime<Utc>,
}

pub async fn create_session(
    State(state): State<ServerState>,
    Json(payload): Json<CreateSessionRequest>,
) -> AppResult<Json<ApiResponse<SessionResponse>>> {
    let table = DiningTableRepository::new(state.pool.clone())
        .find_by_code(&payload.table_code)
        .await?
        .ok_or_else(|| AppError::not_found("Unknown table code"))?;

    let session = state.sessions.issue(&table.restaurant_id, &table.id)?;

    Ok(Json(ApiResponse::ok(SessionResponse {
        token: session.token,
        restaurant_id: session.restaurant_id,
        table_id: session.table_id,
        table_name: table.name,
        expires_at: session.expires_at,
    })))
}

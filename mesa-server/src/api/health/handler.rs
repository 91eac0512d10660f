//! Health check handler

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use shared::ApiResponse;

use crate::core::ServerState;
use crate::utils::AppResult;

#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
    pub environment: String,
}

pub async fn health(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<Health>>> {
    // A failing pool ping surfaces as 500 instead of a false "ok"
    sqlx::query("SELECT 1")
        .execute(&state.pool)
        .await
        .map_err(shared::DomainError::from)?;

    Ok(Json(ApiResponse::ok(Health {
        status: "ok",
        environment: state.config.environment.clone(),
    })))
}

//! Dining table admin handlers

use axum::extract::{Path, State};
use axum::{Extension, Json};
use shared::models::{DiningTable, DiningTableCreate, DiningTableUpdate};
use shared::ApiResponse;
use validator::Validate;

use crate::api::tenant_of;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::DiningTableRepository;
use crate::utils::{AppError, AppResult};

async fn owned_table(
    repo: &DiningTableRepository,
    id: &str,
    restaurant_id: &str,
) -> Result<DiningTable, AppError> {
    let table = repo
        .find_by_id(id)
        .await?
        .filter(|t| t.restaurant_id == restaurant_id)
        .ok_or_else(|| AppError::not_found(format!("Table {id} not found")))?;
    Ok(table)
}

pub async fn list(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<ApiResponse<Vec<DiningTable>>>> {
    let restaurant_id = tenant_of(&user)?;
    let tables = DiningTableRepository::new(state.pool.clone())
        .find_all(&restaurant_id)
        .await?;
    Ok(Json(ApiResponse::ok(tables)))
}

pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<DiningTableCreate>,
) -> AppResult<Json<ApiResponse<DiningTable>>> {
    let restaurant_id = tenant_of(&user)?;
    payload.validate()?;
    let table = DiningTableRepository::new(state.pool.clone())
        .create(&restaurant_id, payload)
        .await?;
    tracing::info!(table_id = %table.id, code = %table.code, "Dining table created");
    Ok(Json(ApiResponse::ok(table)))
}

/// Rename a table; its code (and printed QR) stays stable
pub async fn update(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<DiningTableUpdate>,
) -> AppResult<Json<ApiResponse<DiningTable>>> {
    let restaurant_id = tenant_of(&user)?;
    payload.validate()?;
    let repo = DiningTableRepository::new(state.pool.clone());
    owned_table(&repo, &id, &restaurant_id).await?;
    let table = repo.update(&id, payload).await?;
    Ok(Json(ApiResponse::ok(table)))
}

pub async fn delete(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<bool>>> {
    let restaurant_id = tenant_of(&user)?;
    let repo = DiningTableRepository::new(state.pool.clone());
    owned_table(&repo, &id, &restaurant_id).await?;
    let deleted = repo.delete(&id).await?;
    Ok(Json(ApiResponse::ok(deleted)))
}

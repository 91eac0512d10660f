//! Menu item admin handlers

use axum::extract::{Path, State};
use axum::{Extension, Json};
use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate};
use shared::ApiResponse;
use validator::Validate;

use crate::api::tenant_of;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{CategoryRepository, MenuItemRepository};
use crate::utils::{AppError, AppResult};

async fn owned_item(
    repo: &MenuItemRepository,
    id: &str,
    restaurant_id: &str,
) -> Result<MenuItem, AppError> {
    let item = repo
        .find_by_id(id)
        .await?
        .filter(|i| i.restaurant_id == restaurant_id)
        .ok_or_else(|| AppError::not_found(format!("Menu item {id} not found")))?;
    Ok(item)
}

/// A referenced category must exist in the same tenant
async fn check_category(
    state: &ServerState,
    restaurant_id: &str,
    category_id: &Option<String>,
) -> Result<(), AppError> {
    if let Some(category_id) = category_id {
        CategoryRepository::new(state.pool.clone())
            .find_by_id(category_id)
            .await?
            .filter(|c| c.restaurant_id == restaurant_id)
            .ok_or_else(|| AppError::validation("Unknown category for this restaurant"))?;
    }
    Ok(())
}

pub async fn list(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<ApiResponse<Vec<MenuItem>>>> {
    let restaurant_id = tenant_of(&user)?;
    let items = MenuItemRepository::new(state.pool.clone())
        .find_all(&restaurant_id)
        .await?;
    Ok(Json(ApiResponse::ok(items)))
}

pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<Json<ApiResponse<MenuItem>>> {
    let restaurant_id = tenant_of(&user)?;
    payload.validate()?;
    check_category(&state, &restaurant_id, &payload.category_id).await?;

    let item = MenuItemRepository::new(state.pool.clone())
        .create(&restaurant_id, payload)
        .await?;
    Ok(Json(ApiResponse::ok(item)))
}

pub async fn update(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<ApiResponse<MenuItem>>> {
    let restaurant_id = tenant_of(&user)?;
    payload.validate()?;
    if let Some(category_id) = &payload.category_id {
        check_category(&state, &restaurant_id, category_id).await?;
    }

    let repo = MenuItemRepository::new(state.pool.clone());
    owned_item(&repo, &id, &restaurant_id).await?;
    let item = repo.update(&id, payload).await?;
    Ok(Json(ApiResponse::ok(item)))
}

/// Delete a menu item. Order history keeps its snapshots; the order
/// lines' soft reference goes null.
pub async fn delete(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<bool>>> {
    let restaurant_id = tenant_of(&user)?;
    let repo = MenuItemRepository::new(state.pool.clone());
    owned_item(&repo, &id, &restaurant_id).await?;
    let deleted = repo.delete(&id).await?;
    Ok(Json(ApiResponse::ok(deleted)))
}

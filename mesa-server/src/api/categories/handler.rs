//! Menu category admin handlers
//!
//! All operations run in the tenant of the caller's token. Resources
//! of other tenants answer 404, never 403, so ids don't leak.

use axum::extract::{Path, State};
use axum::{Extension, Json};
use shared::models::{MenuCategory, MenuCategoryCreate, MenuCategoryUpdate};
use shared::ApiResponse;
use validator::Validate;

use crate::api::tenant_of;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::CategoryRepository;
use crate::utils::{AppError, AppResult};

async fn owned_category(
    repo: &CategoryRepository,
    id: &str,
    restaurant_id: &str,
) -> Result<MenuCategory, AppError> {
    let category = repo
        .find_by_id(id)
        .await?
        .filter(|c| c.restaurant_id == restaurant_id)
        .ok_or_else(|| AppError::not_found(format!("Category {id} not found")))?;
    Ok(category)
}

pub async fn list(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<ApiResponse<Vec<MenuCategory>>>> {
    let restaurant_id = tenant_of(&user)?;
    let categories = CategoryRepository::new(state.pool.clone())
        .find_all(&restaurant_id)
        .await?;
    Ok(Json(ApiResponse::ok(categories)))
}

pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<MenuCategoryCreate>,
) -> AppResult<Json<ApiResponse<MenuCategory>>> {
    let restaurant_id = tenant_of(&user)?;
    payload.validate()?;
    let category = CategoryRepository::new(state.pool.clone())
        .create(&restaurant_id, payload)
        .await?;
    Ok(Json(ApiResponse::ok(category)))
}

pub async fn update(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<MenuCategoryUpdate>,
) -> AppResult<Json<ApiResponse<MenuCategory>>> {
    let restaurant_id = tenant_of(&user)?;
    payload.validate()?;
    let repo = CategoryRepository::new(state.pool.clone());
    owned_category(&repo, &id, &restaurant_id).await?;
    let category = repo.update(&id, payload).await?;
    Ok(Json(ApiResponse::ok(category)))
}

/// Delete a category; its items stay, detached
pub async fn delete(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<bool>>> {
    let restaurant_id = tenant_of(&user)?;
    let repo = CategoryRepository::new(state.pool.clone());
    owned_category(&repo, &id, &restaurant_id).await?;
    let deleted = repo.delete(&id).await?;
    Ok(Json(ApiResponse::ok(deleted)))
}

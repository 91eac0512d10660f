//! Restaurant admin handlers

use axum::extract::{Path, State};
use axum::{Extension, Json};
use shared::models::{Restaurant, RestaurantCreate};
use shared::ApiResponse;
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::RestaurantRepository;
use crate::utils::{AppError, AppResult};

fn require_platform(user: &CurrentUser) -> Result<(), AppError> {
    if user.is_platform() {
        Ok(())
    } else {
        Err(AppError::forbidden("Platform role required"))
    }
}

pub async fn list(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<ApiResponse<Vec<Restaurant>>>> {
    require_platform(&user)?;
    let restaurants = RestaurantRepository::new(state.pool.clone()).find_all().await?;
    Ok(Json(ApiResponse::ok(restaurants)))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Restaurant>>> {
    require_platform(&user)?;
    let restaurant = RestaurantRepository::new(state.pool.clone())
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Restaurant {id} not found")))?;
    Ok(Json(ApiResponse::ok(restaurant)))
}

pub async fn create(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<RestaurantCreate>,
) -> AppResult<Json<ApiResponse<Restaurant>>> {
    require_platform(&user)?;
    payload.validate()?;
    let restaurant = RestaurantRepository::new(state.pool.clone())
        .create(payload)
        .await?;
    tracing::info!(restaurant_id = %restaurant.id, slug = %restaurant.slug, "Restaurant created");
    Ok(Json(ApiResponse::ok(restaurant)))
}

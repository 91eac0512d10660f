//! Public menu handlers

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use shared::models::{DiningTable, MenuCategory, MenuItem, Restaurant};
use shared::ApiResponse;

use crate::core::ServerState;
use crate::db::repository::{
    CategoryRepository, DiningTableRepository, MenuItemRepository, RestaurantRepository,
};
use crate::utils::{AppError, AppResult};

/// Everything the customer menu page needs in one response
#[derive(Debug, Serialize)]
pub struct MenuView {
    pub restaurant: Restaurant,
    pub table: DiningTable,
    pub categories: Vec<MenuCategory>,
    /// Available items only
    pub items: Vec<MenuItem>,
}

pub async fn get_menu(
    State(state): State<ServerState>,
    Path(table_code): Path<String>,
) -> AppResult<Json<ApiResponse<MenuView>>> {
    let table = DiningTableRepository::new(state.pool.clone())
        .find_by_code(&table_code)
        .await?
        .ok_or_else(|| AppError::not_found("Unknown table code"))?;

    let restaurant = RestaurantRepository::new(state.pool.clone())
        .find_by_id(&table.restaurant_id)
        .await?
        .ok_or_else(|| AppError::not_found("Restaurant not found"))?;

    let categories = CategoryRepository::new(state.pool.clone())
        .find_all(&restaurant.id)
        .await?;
    let items = MenuItemRepository::new(state.pool.clone())
        .find_available(&restaurant.id)
        .await?;

    Ok(Json(ApiResponse::ok(MenuView {
        restaurant,
        table,
        categories,
        items,
    })))
}

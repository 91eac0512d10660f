//! Menu item repository
//!
//! Prices pass through [`MenuItemRow`] because money is TEXT in
//! SQLite. Deleting an item leaves historical order lines intact:
//! `order_items.menu_item_id` is a soft reference that goes null.

use crate::db::models::MenuItemRow;
use chrono::Utc;
use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate};
use shared::{DomainError, DomainResult};
use sqlx::SqlitePool;
use uuid::Uuid;

const COLUMNS: &str = "id, restaurant_id, category_id, name, description, price, is_available, position, created_at, updated_at";

#[derive(Clone)]
pub struct MenuItemRepository {
    pool: SqlitePool,
}

impl MenuItemRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self, restaurant_id: &str) -> DomainResult<Vec<MenuItem>> {
        let rows = sqlx::query_as::<_, MenuItemRow>(&format!(
            "SELECT {COLUMNS} FROM menu_items WHERE restaurant_id = ? ORDER BY position, name"
        ))
        .bind(restaurant_id)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(MenuItem::try_from).collect()
    }

    /// Items shown on the customer menu
    pub async fn find_available(&self, restaurant_id: &str) -> DomainResult<Vec<MenuItem>> {
        let rows = sqlx::query_as::<_, MenuItemRow>(&format!(
            "SELECT {COLUMNS} FROM menu_items WHERE restaurant_id = ? AND is_available = 1 ORDER BY position, name"
        ))
        .bind(restaurant_id)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(MenuItem::try_from).collect()
    }

    pub async fn find_by_id(&self, id: &str) -> DomainResult<Option<MenuItem>> {
        let row = sqlx::query_as::<_, MenuItemRow>(&format!(
            "SELECT {COLUMNS} FROM menu_items WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(MenuItem::try_from).transpose()
    }

    pub async fn create(
        &self,
        restaurant_id: &str,
        data: MenuItemCreate,
    ) -> DomainResult<MenuItem> {
        let now = Utc::now();
        let item = MenuItem {
            id: Uuid::new_v4().to_string(),
            restaurant_id: restaurant_id.to_string(),
            category_id: data.category_id,
            name: data.name,
            description: data.description,
            price: data.price,
            is_available: data.is_available.unwrap_or(true),
            position: data.position.unwrap_or(0),
            created_at: now,
            updated_at: now,
        };

        sqlx::query(&format!(
            "INSERT INTO menu_items ({COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
        ))
        .bind(&item.id)
        .bind(&item.restaurant_id)
        .bind(&item.category_id)
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.price.to_string())
        .bind(item.is_available)
        .bind(item.position)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(item)
    }

    /// Partial update. `category_id: Some(None)` detaches the item
    /// from its category.
    pub async fn update(&self, id: &str, data: MenuItemUpdate) -> DomainResult<MenuItem> {
        let mut item = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Menu item {id} not found")))?;

        if let Some(name) = data.name {
            item.name = name;
        }
        if let Some(description) = data.description {
            item.description = Some(description);
        }
        if let Some(price) = data.price {
            item.price = price;
        }
        if let Some(category_id) = data.category_id {
            item.category_id = category_id;
        }
        if let Some(is_available) = data.is_available {
            item.is_available = is_available;
        }
        if let Some(position) = data.position {
            item.position = position;
        }
        item.updated_at = Utc::now();

        sqlx::query(
            "UPDATE menu_items SET category_id = ?, name = ?, description = ?, price = ?, is_available = ?, position = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&item.category_id)
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.price.to_string())
        .bind(item.is_available)
        .bind(item.position)
        .bind(item.updated_at)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(item)
    }

    pub async fn delete(&self, id: &str) -> DomainResult<bool> {
        let result = sqlx::query("DELETE FROM menu_items WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

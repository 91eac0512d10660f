//! Menu category repository

use chrono::Utc;
use shared::models::{MenuCategory, MenuCategoryCreate, MenuCategoryUpdate};
use shared::{DomainError, DomainResult};
use sqlx::SqlitePool;
use uuid::Uuid;

#[derive(Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self, restaurant_id: &str) -> DomainResult<Vec<MenuCategory>> {
        let categories = sqlx::query_as::<_, MenuCategory>(
            "SELECT id, restaurant_id, name, position, created_at FROM menu_categories WHERE restaurant_id = ? ORDER BY position, name",
        )
        .bind(restaurant_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(categories)
    }

    pub async fn find_by_id(&self, id: &str) -> DomainResult<Option<MenuCategory>> {
        let category = sqlx::query_as::<_, MenuCategory>(
            "SELECT id, restaurant_id, name, position, created_at FROM menu_categories WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(category)
    }

    pub async fn create(
        &self,
        restaurant_id: &str,
        data: MenuCategoryCreate,
    ) -> DomainResult<MenuCategory> {
        let category = MenuCategory {
            id: Uuid::new_v4().to_string(),
            restaurant_id: restaurant_id.to_string(),
            name: data.name,
            position: data.position.unwrap_or(0),
            created_at: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO menu_categories (id, restaurant_id, name, position, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&category.id)
        .bind(&category.restaurant_id)
        .bind(&category.name)
        .bind(category.position)
        .bind(category.created_at)
        .execute(&self.pool)
        .await?;

        Ok(category)
    }

    pub async fn update(&self, id: &str, data: MenuCategoryUpdate) -> DomainResult<MenuCategory> {
        let mut category = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Category {id} not found")))?;

        if let Some(name) = data.name {
            category.name = name;
        }
        if let Some(position) = data.position {
            category.position = position;
        }

        sqlx::query("UPDATE menu_categories SET name = ?, position = ? WHERE id = ?")
            .bind(&category.name)
            .bind(category.position)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(category)
    }

    /// Delete a category. Items keep existing with a null category
    /// (FK is ON DELETE SET NULL), they are never cascaded away.
    pub async fn delete(&self, id: &str) -> DomainResult<bool> {
        let result = sqlx::query("DELETE FROM menu_categories WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

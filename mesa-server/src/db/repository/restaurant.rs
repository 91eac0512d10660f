//! Restaurant (tenant) repository

use chrono::Utc;
use shared::models::{Restaurant, RestaurantCreate};
use shared::{DomainError, DomainResult};
use sqlx::SqlitePool;
use uuid::Uuid;

#[derive(Clone)]
pub struct RestaurantRepository {
    pool: SqlitePool,
}

impl RestaurantRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> DomainResult<Vec<Restaurant>> {
        let restaurants = sqlx::query_as::<_, Restaurant>(
            "SELECT id, name, slug, created_at, updated_at FROM restaurants ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(restaurants)
    }

    pub async fn find_by_id(&self, id: &str) -> DomainResult<Option<Restaurant>> {
        let restaurant = sqlx::query_as::<_, Restaurant>(
            "SELECT id, name, slug, created_at, updated_at FROM restaurants WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(restaurant)
    }

    pub async fn find_by_slug(&self, slug: &str) -> DomainResult<Option<Restaurant>> {
        let restaurant = sqlx::query_as::<_, Restaurant>(
            "SELECT id, name, slug, created_at, updated_at FROM restaurants WHERE slug = ?",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;
        Ok(restaurant)
    }

    pub async fn create(&self, data: RestaurantCreate) -> DomainResult<Restaurant> {
        if self.find_by_slug(&data.slug).await?.is_some() {
            return Err(DomainError::conflict(format!(
                "Restaurant slug '{}' already exists",
                data.slug
            )));
        }

        let now = Utc::now();
        let restaurant = Restaurant {
            id: Uuid::new_v4().to_string(),
            name: data.name,
            slug: data.slug,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            "INSERT INTO restaurants (id, name, slug, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&restaurant.id)
        .bind(&restaurant.name)
        .bind(&restaurant.slug)
        .bind(restaurant.created_at)
        .bind(restaurant.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(restaurant)
    }
}

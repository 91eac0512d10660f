//! Dining table repository
//!
//! Table `code` is the stable random identifier baked into the
//! customer QR URL; it is generated once at creation and never
//! changes, so printed codes stay valid across renames.

use chrono::Utc;
use shared::models::{DiningTable, DiningTableCreate, DiningTableUpdate};
use shared::{DomainError, DomainResult};
use sqlx::SqlitePool;
use uuid::Uuid;

#[derive(Clone)]
pub struct DiningTableRepository {
    pool: SqlitePool,
}

impl DiningTableRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self, restaurant_id: &str) -> DomainResult<Vec<DiningTable>> {
        let tables = sqlx::query_as::<_, DiningTable>(
            "SELECT id, restaurant_id, name, code, created_at FROM dining_tables WHERE restaurant_id = ? ORDER BY name",
        )
        .bind(restaurant_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(tables)
    }

    pub async fn find_by_id(&self, id: &str) -> DomainResult<Option<DiningTable>> {
        let table = sqlx::query_as::<_, DiningTable>(
            "SELECT id, restaurant_id, name, code, created_at FROM dining_tables WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(table)
    }

    /// Resolve the table a customer scanned
    pub async fn find_by_code(&self, code: &str) -> DomainResult<Option<DiningTable>> {
        let table = sqlx::query_as::<_, DiningTable>(
            "SELECT id, restaurant_id, name, code, created_at FROM dining_tables WHERE code = ?",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;
        Ok(table)
    }

    pub async fn create(
        &self,
        restaurant_id: &str,
        data: DiningTableCreate,
    ) -> DomainResult<DiningTable> {
        let table = DiningTable {
            id: Uuid::new_v4().to_string(),
            restaurant_id: restaurant_id.to_string(),
            name: data.name,
            code: Uuid::new_v4().simple().to_string(),
            created_at: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO dining_tables (id, restaurant_id, name, code, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&table.id)
        .bind(&table.restaurant_id)
        .bind(&table.name)
        .bind(&table.code)
        .bind(table.created_at)
        .execute(&self.pool)
        .await?;

        Ok(table)
    }

    pub async fn update(&self, id: &str, data: DiningTableUpdate) -> DomainResult<DiningTable> {
        let mut table = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Table {id} not found")))?;

        if let Some(name) = data.name {
            table.name = name;
        }

        sqlx::query("UPDATE dining_tables SET name = ? WHERE id = ?")
            .bind(&table.name)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(table)
    }

    pub async fn delete(&self, id: &str) -> DomainResult<bool> {
        let result = sqlx::query("DELETE FROM dining_tables WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

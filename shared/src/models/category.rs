//! Menu Category Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Menu category entity
///
/// Used only for grouping. Deleting a category detaches its items
/// (their category reference becomes null) rather than cascading.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MenuCategory {
    pub id: String,
    pub restaurant_id: String,
    pub name: String,
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

/// Create category payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MenuCategoryCreate {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    pub position: Option<i32>,
}

/// Update category payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MenuCategoryUpdate {
    #[validate(length(min = 1, max = 120))]
    pub name: Option<String>,
    pub position: Option<i32>,
}

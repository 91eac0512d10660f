//! Menu Item Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Menu item entity
///
/// `price` is a decimal with two fraction digits. Orders snapshot
/// name/price at placement time, so editing or deleting a menu item
/// never rewrites order history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub restaurant_id: String,
    /// Null when the item is uncategorized (or its category was deleted)
    pub category_id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub is_available: bool,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MenuItemCreate {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category_id: Option<String>,
    pub is_available: Option<bool>,
    pub position: Option<i32>,
}

/// Update menu item payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MenuItemUpdate {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    /// `Some(None)` detaches the item from its category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Option<String>>,
    pub is_available: Option<bool>,
    pub position: Option<i32>,
}

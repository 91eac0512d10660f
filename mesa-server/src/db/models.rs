//! Row types for tables whose domain models carry `Decimal` money
//!
//! sqlx's SQLite driver has no `rust_decimal` support, so money
//! columns are TEXT and travel through these row structs. Conversion
//! to the domain model parses the decimal string and the status
//! column; a malformed row surfaces as a `Transport` error rather
//! than a panic.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::models::MenuItem;
use shared::order::{Order, OrderLine, OrderStatus};
use shared::DomainError;
use sqlx::FromRow;

fn parse_money(column: &str, raw: &str) -> Result<Decimal, DomainError> {
    raw.parse()
        .map_err(|_| DomainError::transport(format!("Malformed decimal in {column}: {raw}")))
}

#[derive(Debug, FromRow)]
pub struct MenuItemRow {
    pub id: String,
    pub restaurant_id: String,
    pub category_id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub price: String,
    pub is_available: bool,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<MenuItemRow> for MenuItem {
    type Error = DomainError;

    fn try_from(row: MenuItemRow) -> Result<Self, Self::Error> {
        let price = parse_money("menu_items.price", &row.price)?;
        Ok(MenuItem {
            id: row.id,
            restaurant_id: row.restaurant_id,
            category_id: row.category_id,
            name: row.name,
            description: row.description,
            price,
            is_available: row.is_available,
            position: row.position,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
pub struct OrderRow {
    pub id: String,
    pub restaurant_id: String,
    pub table_id: String,
    pub status: String,
    pub total_amount: String,
    pub revision: i64,
    pub session_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = DomainError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let status: OrderStatus = row
            .status
            .parse()
            .map_err(|e: String| DomainError::transport(e))?;
        let total_amount = parse_money("orders.total_amount", &row.total_amount)?;
        Ok(Order {
            id: row.id,
            restaurant_id: row.restaurant_id,
            table_id: row.table_id,
            status,
            total_amount,
            revision: row.revision,
            session_id: row.session_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
pub struct OrderLineRow {
    pub id: String,
    pub order_id: String,
    pub menu_item_id: Option<String>,
    pub name_at_order: String,
    pub price_at_order: String,
    pub quantity: i32,
    pub notes: Option<String>,
}

impl TryFrom<OrderLineRow> for OrderLine {
    type Error = DomainError;

    fn try_from(row: OrderLineRow) -> Result<Self, Self::Error> {
        let price_at_order = parse_money("order_items.price_at_order", &row.price_at_order)?;
        Ok(OrderLine {
            id: row.id,
            order_id: row.order_id,
            menu_item_id: row.menu_item_id,
            name_at_order: row.name_at_order,
            price_at_order,
            quantity: row.quantity,
            notes: row.notes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_row_conversion() {
        let now = Utc::now();
        let row = OrderRow {
            id: "order-1".into(),
            restaurant_id: "rest-1".into(),
            table_id: "table-1".into(),
            status: "PREPARING".into(),
            total_amount: "12.50".into(),
            revision: 3,
            session_id: None,
            created_at: now,
            updated_at: now,
        };
        let order = Order::try_from(row).unwrap();
        assert_eq!(order.status, OrderStatus::Preparing);
        assert_eq!(order.total_amount, "12.50".parse().unwrap());
    }

    #[test]
    fn test_malformed_money_is_transport_error() {
        let now = Utc::now();
        let row = OrderRow {
            id: "order-1".into(),
            restaurant_id: "rest-1".into(),
            table_id: "table-1".into(),
            status: "PENDING".into(),
            total_amount: "not-a-number".into(),
            revision: 1,
            session_id: None,
            created_at: now,
            updated_at: now,
        };
        assert!(matches!(
            Order::try_from(row),
            Err(DomainError::Transport(_))
        ));
    }
}

//! Order entity and line item snapshots

use super::OrderStatus;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order entity
///
/// `revision` increases on every successful mutation and serves as the
/// optimistic-concurrency token: customer updates carry an expected
/// revision and fail with a conflict when it no longer matches.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: String,
    pub restaurant_id: String,
    pub table_id: String,
    pub status: OrderStatus,
    pub total_amount: Decimal,
    pub revision: i64,
    /// Table session that created the order; customer mutations must
    /// present the matching session token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Order line item — immutable snapshot of a menu item at order time
///
/// `name_at_order` and `price_at_order` are decoupled from live menu
/// data, so historical orders display correctly after menu edits.
/// `menu_item_id` is nullable: it is preserved as a soft reference and
/// becomes null if the menu item is later deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLine {
    pub id: String,
    pub order_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub menu_item_id: Option<String>,
    pub name_at_order: String,
    pub price_at_order: Decimal,
    pub quantity: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Line item input for placing or replacing an order's lines
///
/// Carries the client-side snapshot taken when the item entered the
/// cart. The engine re-reads nothing from the live menu; the cart's
/// snapshot is authoritative for name and price at order time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineInput {
    pub menu_item_id: String,
    pub name: String,
    pub price: Decimal,
    pub quantity: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl LineInput {
    /// Line total without intermediate rounding
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Order plus its line items, as returned by queries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderWithLines {
    #[serde(flatten)]
    pub order: Order,
    pub lines: Vec<OrderLine>,
}

/// Sum of `price × quantity` across lines, unrounded
pub fn total_of(lines: &[LineInput]) -> Decimal {
    lines.iter().map(LineInput::line_total).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn line(price: &str, quantity: i32) -> LineInput {
        LineInput {
            menu_item_id: "item-1".to_string(),
            name: "Test".to_string(),
            price: price.parse().unwrap(),
            quantity,
            notes: None,
        }
    }

    #[test]
    fn test_total_accumulates_without_rounding() {
        let lines = vec![line("5.00", 2), line("2.50", 1)];
        assert_eq!(total_of(&lines), dec("12.50"));
    }

    #[test]
    fn test_line_total() {
        assert_eq!(line("3.33", 3).line_total(), dec("9.99"));
    }
}

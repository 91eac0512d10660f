//! Cart state — lines keyed by menu item id
//!
//! Invariants: at most one line per distinct menu item id; every
//! retained line has quantity ≥ 1. Totals accumulate unrounded;
//! two-decimal rounding is applied only at display time.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::MenuItem;
use shared::order::{LineInput, OrderLine};

/// Cart namespace key
///
/// An explicit key object rather than a concatenated string, so
/// concurrent tabs for different tables never collide and tests can
/// swap in an in-memory store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CartKey {
    pub restaurant_id: String,
    pub table_id: String,
}

impl CartKey {
    pub fn new(restaurant_id: impl Into<String>, table_id: impl Into<String>) -> Self {
        Self {
            restaurant_id: restaurant_id.into(),
            table_id: table_id.into(),
        }
    }

    /// Storage key for the backing key-value store
    pub fn storage_key(&self) -> String {
        format!("{}/{}", self.restaurant_id, self.table_id)
    }
}

/// One cart line: a quantity of a menu item with optional notes
///
/// `name`/`price` are snapshots taken when the item entered the cart;
/// they travel with the order on submission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    pub menu_item_id: String,
    pub name: String,
    pub price: Decimal,
    pub quantity: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Cart state
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    pub lines: Vec<CartLine>,
}

impl Cart {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Merge a menu item into the cart: existing line gains quantity 1,
    /// otherwise a new line is appended with a name/price snapshot
    pub fn add_item(&mut self, item: &MenuItem) {
        if let Some(line) = self.line_mut(&item.id) {
            line.quantity += 1;
            return;
        }
        self.lines.push(CartLine {
            menu_item_id: item.id.clone(),
            name: item.name.clone(),
            price: item.price,
            quantity: 1,
            notes: None,
        });
    }

    /// Add `delta` to a line's quantity; ≤ 0 removes the line.
    /// No-op when the line does not exist.
    pub fn change_quantity(&mut self, menu_item_id: &str, delta: i32) {
        let Some(line) = self.line_mut(menu_item_id) else {
            return;
        };
        line.quantity += delta;
        if line.quantity <= 0 {
            self.remove_item(menu_item_id);
        }
    }

    /// Replace the notes on a line; no length validation here
    pub fn update_notes(&mut self, menu_item_id: &str, notes: impl Into<String>) {
        if let Some(line) = self.line_mut(menu_item_id) {
            let text = notes.into();
            line.notes = if text.is_empty() { None } else { Some(text) };
        }
    }

    /// Remove a line unconditionally
    pub fn remove_item(&mut self, menu_item_id: &str) {
        self.lines.retain(|l| l.menu_item_id != menu_item_id);
    }

    /// Sum of `price × quantity`, unrounded
    pub fn total(&self) -> Decimal {
        self.lines
            .iter()
            .map(|l| l.price * Decimal::from(l.quantity))
            .sum()
    }

    /// Total rounded to two decimals, for display
    pub fn display_total(&self) -> Decimal {
        self.total().round_dp(2)
    }

    /// Sum of quantities (not the number of distinct lines)
    pub fn count(&self) -> i32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Seed the cart from a pending order's line items
    ///
    /// Applies only when the local cart is empty: a customer resuming a
    /// session sees their pending order as an editable cart, but local
    /// in-progress edits are never clobbered by a stale background
    /// refresh. Lines whose menu item was deleted (null reference) are
    /// skipped; they cannot be re-keyed.
    pub fn reconcile_with_order(&mut self, order_lines: &[OrderLine]) {
        if !self.is_empty() {
            return;
        }
        for line in order_lines {
            let Some(menu_item_id) = &line.menu_item_id else {
                tracing::debug!(order_id = %line.order_id, "Skipping orphaned order line during reconcile");
                continue;
            };
            self.lines.push(CartLine {
                menu_item_id: menu_item_id.clone(),
                name: line.name_at_order.clone(),
                price: line.price_at_order,
                quantity: line.quantity,
                notes: line.notes.clone(),
            });
        }
    }

    /// Convert to line inputs for order submission
    pub fn to_line_inputs(&self) -> Vec<LineInput> {
        self.lines
            .iter()
            .map(|l| LineInput {
                menu_item_id: l.menu_item_id.clone(),
                name: l.name.clone(),
                price: l.price,
                quantity: l.quantity,
                notes: l.notes.clone(),
            })
            .collect()
    }

    fn line_mut(&mut self, menu_item_id: &str) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|l| l.menu_item_id == menu_item_id)
    }
}

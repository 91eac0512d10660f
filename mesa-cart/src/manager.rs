//! CartManager — persistent cart operations for one table session
//!
//! Wraps [`Cart`] with a [`CartStore`] so every mutation is written
//! through under the session's [`CartKey`]. A manager constructed
//! without an ordering context (no key) turns all mutations into
//! no-ops, mirroring a customer browsing a menu outside a table URL.

use crate::cart::{Cart, CartKey};
use crate::error::CartResult;
use crate::store::CartStore;
use rust_decimal::Decimal;
use shared::models::MenuItem;
use shared::order::{LineInput, OrderLine};
use std::sync::Arc;

/// Cart manager for a single table session
pub struct CartManager<S: CartStore> {
    store: Arc<S>,
    key: Option<CartKey>,
    cart: Cart,
}

impl<S: CartStore> CartManager<S> {
    /// Attach to a table session, replaying any persisted cart
    pub fn attach(store: Arc<S>, key: CartKey) -> CartResult<Self> {
        let cart = store.load(&key)?.unwrap_or_default();
        Ok(Self {
            store,
            key: Some(key),
            cart,
        })
    }

    /// Create a manager without an ordering context; mutations no-op
    pub fn detached(store: Arc<S>) -> Self {
        Self {
            store,
            key: None,
            cart: Cart::default(),
        }
    }

    pub fn has_context(&self) -> bool {
        self.key.is_some()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Add one unit of a menu item (merge by menu item id)
    pub fn add_item(&mut self, item: &MenuItem) -> CartResult<()> {
        if self.key.is_none() {
            tracing::debug!(item = %item.id, "Ignoring add_item without ordering context");
            return Ok(());
        }
        self.cart.add_item(item);
        self.persist()
    }

    /// Adjust a line's quantity; a result ≤ 0 removes the line
    pub fn change_quantity(&mut self, menu_item_id: &str, delta: i32) -> CartResult<()> {
        if self.key.is_none() {
            return Ok(());
        }
        self.cart.change_quantity(menu_item_id, delta);
        self.persist()
    }

    /// Replace a line's free-text notes
    pub fn update_notes(&mut self, menu_item_id: &str, notes: impl Into<String>) -> CartResult<()> {
        if self.key.is_none() {
            return Ok(());
        }
        self.cart.update_notes(menu_item_id, notes);
        self.persist()
    }

    /// Remove a line unconditionally
    pub fn remove_item(&mut self, menu_item_id: &str) -> CartResult<()> {
        if self.key.is_none() {
            return Ok(());
        }
        self.cart.remove_item(menu_item_id);
        self.persist()
    }

    /// Unrounded cart total
    pub fn total(&self) -> Decimal {
        self.cart.total()
    }

    /// Cart total rounded to two decimals for display
    pub fn display_total(&self) -> Decimal {
        self.cart.display_total()
    }

    /// Sum of quantities across all lines
    pub fn count(&self) -> i32 {
        self.cart.count()
    }

    /// Empty the cart and delete the persisted copy
    pub fn clear(&mut self) -> CartResult<()> {
        self.cart = Cart::default();
        if let Some(key) = &self.key {
            self.store.remove(key)?;
        }
        Ok(())
    }

    /// Seed from a pending order when the local cart is empty;
    /// local state wins otherwise. Idempotent.
    pub fn reconcile_with_order(&mut self, order_lines: &[OrderLine]) -> CartResult<()> {
        if self.key.is_none() || !self.cart.is_empty() {
            return Ok(());
        }
        self.cart.reconcile_with_order(order_lines);
        if !self.cart.is_empty() {
            self.persist()?;
        }
        Ok(())
    }

    /// Line inputs for submission to the order engine
    pub fn to_line_inputs(&self) -> Vec<LineInput> {
        self.cart.to_line_inputs()
    }

    fn persist(&self) -> CartResult<()> {
        match &self.key {
            Some(key) => self.store.save(key, &self.cart),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryCartStore;
    use chrono::Utc;
    use shared::order::OrderLine;

    fn menu_item(id: &str, name: &str, price: &str) -> MenuItem {
        let now = Utc::now();
        MenuItem {
            id: id.to_string(),
            restaurant_id: "rest-1".to_string(),
            category_id: None,
            name: name.to_string(),
            description: None,
            price: price.parse().unwrap(),
            is_available: true,
            position: 0,
            created_at: now,
            updated_at: now,
        }
    }

    fn manager() -> CartManager<MemoryCartStore> {
        let store = Arc::new(MemoryCartStore::new());
        CartManager::attach(store, CartKey::new("rest-1", "table-1")).unwrap()
    }

    #[test]
    fn test_add_item_merges_by_menu_item_id() {
        let mut mgr = manager();
        let coffee = menu_item("item-1", "Coffee", "2.50");

        mgr.add_item(&coffee).unwrap();
        mgr.add_item(&coffee).unwrap();
        mgr.add_item(&menu_item("item-2", "Tostada", "3.20")).unwrap();

        assert_eq!(mgr.cart().lines.len(), 2);
        assert_eq!(mgr.cart().lines[0].quantity, 2);
        assert_eq!(mgr.count(), 3);
    }

    #[test]
    fn test_no_duplicate_lines_across_mutations() {
        let mut mgr = manager();
        let item = menu_item("item-1", "Coffee", "2.50");

        mgr.add_item(&item).unwrap();
        mgr.change_quantity("item-1", 3).unwrap();
        mgr.add_item(&item).unwrap();
        mgr.change_quantity("item-1", -2).unwrap();

        let ids: Vec<_> = mgr.cart().lines.iter().map(|l| &l.menu_item_id).collect();
        let mut deduped = ids.clone();
        deduped.dedup();
        assert_eq!(ids, deduped);
        assert_eq!(mgr.count(), 3);
        assert_eq!(
            mgr.count(),
            mgr.cart().lines.iter().map(|l| l.quantity).sum::<i32>()
        );
    }

    #[test]
    fn test_quantity_reaching_zero_removes_line() {
        let mut mgr = manager();
        mgr.add_item(&menu_item("item-1", "Coffee", "2.50")).unwrap();
        mgr.change_quantity("item-1", -1).unwrap();
        assert!(mgr.is_empty());

        // No-op on a missing line
        mgr.change_quantity("item-1", 1).unwrap();
        assert!(mgr.is_empty());
    }

    #[test]
    fn test_total_and_display_rounding() {
        let mut mgr = manager();
        mgr.add_item(&menu_item("item-1", "Menu del día", "5.00")).unwrap();
        mgr.change_quantity("item-1", 1).unwrap();
        mgr.add_item(&menu_item("item-2", "Café", "2.50")).unwrap();

        assert_eq!(mgr.total(), "12.50".parse().unwrap());
        assert_eq!(mgr.display_total(), "12.50".parse().unwrap());
    }

    #[test]
    fn test_notes_update() {
        let mut mgr = manager();
        mgr.add_item(&menu_item("item-1", "Burger", "9.90")).unwrap();
        mgr.update_notes("item-1", "no onion").unwrap();
        assert_eq!(mgr.cart().lines[0].notes.as_deref(), Some("no onion"));

        mgr.update_notes("item-1", "").unwrap();
        assert!(mgr.cart().lines[0].notes.is_none());
    }

    #[test]
    fn test_mutations_persist_and_replay() {
        let store = Arc::new(MemoryCartStore::new());
        let key = CartKey::new("rest-1", "table-7");

        let mut mgr = CartManager::attach(store.clone(), key.clone()).unwrap();
        mgr.add_item(&menu_item("item-1", "Coffee", "2.50")).unwrap();
        mgr.update_notes("item-1", "oat milk").unwrap();

        // A reload attaches a fresh manager to the same store
        let replayed = CartManager::attach(store, key).unwrap();
        assert_eq!(replayed.cart(), mgr.cart());
    }

    #[test]
    fn test_clear_removes_persisted_copy() {
        let store = Arc::new(MemoryCartStore::new());
        let key = CartKey::new("rest-1", "table-1");
        let mut mgr = CartManager::attach(store.clone(), key.clone()).unwrap();
        mgr.add_item(&menu_item("item-1", "Coffee", "2.50")).unwrap();

        mgr.clear().unwrap();
        assert!(mgr.is_empty());
        assert!(store.load(&key).unwrap().is_none());
    }

    #[test]
    fn test_detached_manager_ignores_mutations() {
        let mut mgr = CartManager::detached(Arc::new(MemoryCartStore::new()));
        mgr.add_item(&menu_item("item-1", "Coffee", "2.50")).unwrap();
        assert!(mgr.is_empty());
        assert!(!mgr.has_context());
    }

    fn order_line(menu_item_id: Option<&str>, name: &str, price: &str, quantity: i32) -> OrderLine {
        OrderLine {
            id: format!("line-{name}"),
            order_id: "order-1".to_string(),
            menu_item_id: menu_item_id.map(str::to_string),
            name_at_order: name.to_string(),
            price_at_order: price.parse().unwrap(),
            quantity,
            notes: None,
        }
    }

    #[test]
    fn test_reconcile_seeds_empty_cart() {
        let mut mgr = manager();
        let lines = vec![
            order_line(Some("item-1"), "Coffee", "2.50", 2),
            order_line(Some("item-2"), "Tostada", "3.20", 1),
        ];
        mgr.reconcile_with_order(&lines).unwrap();

        assert_eq!(mgr.cart().lines.len(), 2);
        assert_eq!(mgr.count(), 3);
        assert_eq!(mgr.cart().lines[0].price, "2.50".parse().unwrap());
    }

    #[test]
    fn test_reconcile_local_wins_and_is_idempotent() {
        let mut mgr = manager();
        mgr.add_item(&menu_item("item-9", "Local edit", "1.00")).unwrap();
        let local = mgr.cart().clone();

        let lines = vec![order_line(Some("item-1"), "Coffee", "2.50", 2)];
        mgr.reconcile_with_order(&lines).unwrap();
        mgr.reconcile_with_order(&lines).unwrap();

        assert_eq!(mgr.cart(), &local);
    }

    #[test]
    fn test_reconcile_skips_orphaned_lines() {
        let mut mgr = manager();
        let lines = vec![
            order_line(None, "Deleted dish", "4.00", 1),
            order_line(Some("item-2"), "Tostada", "3.20", 1),
        ];
        mgr.reconcile_with_order(&lines).unwrap();
        assert_eq!(mgr.cart().lines.len(), 1);
        assert_eq!(mgr.cart().lines[0].menu_item_id, "item-2");
    }
}

//! Order lifecycle engine
//!
//! All order mutations go through [`OrderEngine`]: placement with
//! line-item snapshots, customer line replacement under an optimistic
//! revision precondition, and admin status transitions validated
//! against the status machine. Every committed mutation publishes an
//! [`OrderChange`] on the feed.

use crate::db::repository::order as order_repo;
use crate::db::repository::DiningTableRepository;
use crate::orders::OrderFeed;
use chrono::Utc;
use shared::order::{
    total_of, LineInput, Order, OrderChange, OrderChangeAction, OrderLine, OrderStatus,
    OrderWithLines,
};
use shared::{DomainError, DomainResult};
use sqlx::SqlitePool;
use uuid::Uuid;

#[cfg(test)]
mod tests;

/// Caller's tenant scope, derived from the admin JWT
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TenantScope {
    /// Platform operator, may act on any restaurant
    Platform,
    /// Restaurant admin, restricted to one tenant
    Restaurant(String),
}

impl TenantScope {
    pub fn allows(&self, restaurant_id: &str) -> bool {
        match self {
            Self::Platform => true,
            Self::Restaurant(id) => id == restaurant_id,
        }
    }
}

pub struct OrderEngine {
    pool: SqlitePool,
    feed: OrderFeed,
}

impl OrderEngine {
    pub fn new(pool: SqlitePool, feed: OrderFeed) -> Self {
        Self { pool, feed }
    }

    /// Place a new order from cart line inputs
    ///
    /// The order row is created first, then each line snapshot. If a
    /// line insert fails the half-created order is deleted before the
    /// error propagates, so a zero-item orphan never remains.
    pub async fn place_order(
        &self,
        restaurant_id: &str,
        table_id: &str,
        session_id: Option<&str>,
        lines: Vec<LineInput>,
    ) -> DomainResult<OrderWithLines> {
        if lines.is_empty() {
            return Err(DomainError::validation("Cannot place an order without items"));
        }
        check_quantities(&lines)?;

        let table = DiningTableRepository::new(self.pool.clone())
            .find_by_id(table_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Table {table_id} not found")))?;
        if table.restaurant_id != restaurant_id {
            return Err(DomainError::validation(
                "Table does not belong to this restaurant",
            ));
        }

        let now = Utc::now();
        let order = Order {
            id: Uuid::new_v4().to_string(),
            restaurant_id: restaurant_id.to_string(),
            table_id: table_id.to_string(),
            status: OrderStatus::Pending,
            total_amount: total_of(&lines),
            revision: 1,
            session_id: session_id.map(str::to_string),
            created_at: now,
            updated_at: now,
        };

        order_repo::insert_order(&self.pool, &order).await?;

        // A failing line insert triggers the compensating delete below.
        if let Err(err) = self.insert_lines(&order.id, &lines).await {
            if let Err(cleanup_err) = order_repo::delete_order(&self.pool, &order.id).await {
                tracing::error!(
                    order_id = %order.id,
                    error = %cleanup_err,
                    "Compensating delete failed after line insert error"
                );
            } else {
                tracing::warn!(
                    order_id = %order.id,
                    error = %err,
                    "Order placement rolled back after line insert failure"
                );
            }
            return Err(err);
        }

        tracing::info!(
            order_id = %order.id,
            restaurant_id = %order.restaurant_id,
            table_id = %order.table_id,
            total = %order.total_amount,
            "Order placed"
        );

        self.feed.publish(OrderChange::new(
            &order.restaurant_id,
            &order.id,
            &order.table_id,
            OrderChangeAction::Created,
            order.status,
            order.revision,
        ));

        let lines = order_repo::find_lines(&self.pool, &order.id).await?;
        Ok(OrderWithLines { order, lines })
    }

    /// Replace a pending order's lines (customer path)
    ///
    /// Requires the creating session token, `Pending` status, and a
    /// matching revision. Delete-then-insert runs in one transaction.
    pub async fn update_order(
        &self,
        order_id: &str,
        expected_revision: i64,
        session_id: &str,
        lines: Vec<LineInput>,
    ) -> DomainResult<OrderWithLines> {
        if lines.is_empty() {
            return Err(DomainError::validation(
                "Cannot replace order lines with an empty set",
            ));
        }
        check_quantities(&lines)?;

        let mut order = self.load_order(order_id).await?;

        if order.session_id.as_deref() != Some(session_id) {
            return Err(DomainError::authorization(
                "Order belongs to a different table session",
            ));
        }
        if !order.status.is_editable() {
            return Err(DomainError::invalid_state(format!(
                "Order is {} and can no longer be edited",
                order.status
            )));
        }
        if order.revision != expected_revision {
            return Err(DomainError::conflict(format!(
                "Order was modified concurrently (revision {} != expected {})",
                order.revision, expected_revision
            )));
        }

        order.total_amount = total_of(&lines);
        order.revision += 1;
        order.updated_at = Utc::now();

        let mut tx = self.pool.begin().await?;
        order_repo::delete_lines(&mut *tx, order_id).await?;
        for line in &lines {
            order_repo::insert_line(&mut *tx, &new_line(order_id, line)).await?;
        }
        order_repo::update_totals(
            &mut *tx,
            order_id,
            &order.total_amount,
            order.revision,
            order.updated_at,
        )
        .await?;
        tx.commit().await?;

        tracing::info!(
            order_id = %order.id,
            revision = order.revision,
            total = %order.total_amount,
            "Order lines replaced"
        );

        self.feed.publish(OrderChange::new(
            &order.restaurant_id,
            &order.id,
            &order.table_id,
            OrderChangeAction::LinesReplaced,
            order.status,
            order.revision,
        ));

        let lines = order_repo::find_lines(&self.pool, order_id).await?;
        Ok(OrderWithLines { order, lines })
    }

    /// Move an order to a new status (admin path)
    pub async fn set_status(
        &self,
        order_id: &str,
        new_status: OrderStatus,
        scope: &TenantScope,
    ) -> DomainResult<Order> {
        let mut order = self.load_order(order_id).await?;

        if !scope.allows(&order.restaurant_id) {
            return Err(DomainError::authorization(
                "Order belongs to a different restaurant",
            ));
        }
        if !order.status.can_transition(new_status) {
            return Err(DomainError::invalid_state(format!(
                "Cannot move order from {} to {}",
                order.status, new_status
            )));
        }

        let previous = order.status;
        order.status = new_status;
        order.revision += 1;
        order.updated_at = Utc::now();

        order_repo::update_status(
            &self.pool,
            order_id,
            order.status,
            order.revision,
            order.updated_at,
        )
        .await?;

        tracing::info!(
            order_id = %order.id,
            from = %previous,
            to = %order.status,
            "Order status changed"
        );

        self.feed.publish(OrderChange::new(
            &order.restaurant_id,
            &order.id,
            &order.table_id,
            OrderChangeAction::StatusChanged,
            order.status,
            order.revision,
        ));

        Ok(order)
    }

    /// Most recent pending order for a table, with lines
    pub async fn find_active_order(
        &self,
        restaurant_id: &str,
        table_id: &str,
    ) -> DomainResult<Option<OrderWithLines>> {
        match order_repo::find_active(&self.pool, restaurant_id, table_id).await? {
            Some(order) => {
                let lines = order_repo::find_lines(&self.pool, &order.id).await?;
                Ok(Some(OrderWithLines { order, lines }))
            }
            None => Ok(None),
        }
    }

    /// Order plus lines; authorization is the caller's concern
    pub async fn get_order(&self, order_id: &str) -> DomainResult<OrderWithLines> {
        let order = self.load_order(order_id).await?;
        let lines = order_repo::find_lines(&self.pool, order_id).await?;
        Ok(OrderWithLines { order, lines })
    }

    /// Tenant order listing, newest first
    pub async fn list_orders(
        &self,
        restaurant_id: &str,
        status: Option<OrderStatus>,
        limit: i32,
        offset: i32,
    ) -> DomainResult<Vec<Order>> {
        order_repo::list(&self.pool, restaurant_id, status, limit, offset).await
    }

    async fn load_order(&self, order_id: &str) -> DomainResult<Order> {
        order_repo::find_by_id(&self.pool, order_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Order {order_id} not found")))
    }

    async fn insert_lines(&self, order_id: &str, lines: &[LineInput]) -> DomainResult<()> {
        for line in lines {
            order_repo::insert_line(&self.pool, &new_line(order_id, line)).await?;
        }
        Ok(())
    }
}

/// Reject non-positive quantities before anything touches the store
fn check_quantities(lines: &[LineInput]) -> DomainResult<()> {
    for line in lines {
        if line.quantity < 1 {
            return Err(DomainError::validation(format!(
                "Quantity for {} must be at least 1",
                line.name
            )));
        }
    }
    Ok(())
}

fn new_line(order_id: &str, input: &LineInput) -> OrderLine {
    OrderLine {
        id: Uuid::new_v4().to_string(),
        order_id: order_id.to_string(),
        menu_item_id: Some(input.menu_item_id.clone()),
        name_at_order: input.name.clone(),
        price_at_order: input.price,
        quantity: input.quantity,
        notes: input.notes.clone(),
    }
}

//! Order change notifications
//!
//! Broadcast after every committed order mutation. Observers (admin
//! order list, customer status view) re-fetch on receipt; the feed
//! carries no authoritative state beyond the new revision.

use super::OrderStatus;
use serde::{Deserialize, Serialize};

/// What happened to the order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderChangeAction {
    Created,
    LinesReplaced,
    StatusChanged,
}

/// Change notification event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderChange {
    pub restaurant_id: String,
    pub order_id: String,
    pub table_id: String,
    pub action: OrderChangeAction,
    /// Order status after the change
    pub status: OrderStatus,
    /// Order revision after the change
    pub revision: i64,
    /// Server timestamp (Unix milliseconds)
    pub timestamp: i64,
}

impl OrderChange {
    pub fn new(
        restaurant_id: impl Into<String>,
        order_id: impl Into<String>,
        table_id: impl Into<String>,
        action: OrderChangeAction,
        status: OrderStatus,
        revision: i64,
    ) -> Self {
        Self {
            restaurant_id: restaurant_id.into(),
            order_id: order_id.into(),
            table_id: table_id.into(),
            action,
            status,
            revision,
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }
}

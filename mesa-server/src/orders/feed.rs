//! Order change feed
//!
//! A broadcast channel of [`OrderChange`] events, published after
//! every committed order mutation. Subscribers filter by restaurant
//! (admin dashboard) or order id (customer status view) and re-fetch
//! on receipt — the feed is a wake-up signal, not a state stream.

use shared::order::OrderChange;
use tokio::sync::broadcast;

#[derive(Clone)]
pub struct OrderFeed {
    tx: broadcast::Sender<OrderChange>,
}

impl OrderFeed {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publish a change. Having no subscribers is not an error.
    pub fn publish(&self, change: OrderChange) {
        tracing::debug!(
            order_id = %change.order_id,
            action = ?change.action,
            revision = change.revision,
            "Order change published"
        );
        let _ = self.tx.send(change);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<OrderChange> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for OrderFeed {
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::order::{OrderChangeAction, OrderStatus};

    fn change(restaurant_id: &str, order_id: &str) -> OrderChange {
        OrderChange::new(
            restaurant_id,
            order_id,
            "table-1",
            OrderChangeAction::Created,
            OrderStatus::Pending,
            1,
        )
    }

    #[tokio::test]
    async fn test_subscriber_receives_published_change() {
        let feed = OrderFeed::new(8);
        let mut rx = feed.subscribe();

        feed.publish(change("rest-1", "order-1"));

        let received = rx.recv().await.unwrap();
        assert_eq!(received.order_id, "order-1");
        assert_eq!(received.action, OrderChangeAction::Created);
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_ok() {
        let feed = OrderFeed::new(8);
        feed.publish(change("rest-1", "order-1"));
        assert_eq!(feed.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_each_subscriber_sees_every_change() {
        let feed = OrderFeed::new(8);
        let mut rx_a = feed.subscribe();
        let mut rx_b = feed.subscribe();

        feed.publish(change("rest-1", "order-1"));
        feed.publish(change("rest-2", "order-2"));

        assert_eq!(rx_a.recv().await.unwrap().order_id, "order-1");
        assert_eq!(rx_a.recv().await.unwrap().order_id, "order-2");
        assert_eq!(rx_b.recv().await.unwrap().order_id, "order-1");
        assert_eq!(rx_b.recv().await.unwrap().order_id, "order-2");
    }
}

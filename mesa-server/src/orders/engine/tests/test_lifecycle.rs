use super::*;

async fn place(ctx: &TestContext) -> Order {
    ctx.engine
        .place_order(
            &ctx.restaurant_id,
            &ctx.table_id,
            Some("sess-1"),
            vec![line_for(&ctx.coffee, 1)],
        )
        .await
        .unwrap()
        .order
}

#[tokio::test]
async fn test_happy_path_persists_and_bumps_revision() {
    let ctx = setup().await;
    let order = place(&ctx).await;
    let scope = TenantScope::Restaurant(ctx.restaurant_id.clone());

    let steps = [
        OrderStatus::Accepted,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Served,
    ];
    let mut expected_revision = order.revision;
    for status in steps {
        let updated = ctx.engine.set_status(&order.id, status, &scope).await.unwrap();
        expected_revision += 1;
        assert_eq!(updated.status, status);
        assert_eq!(updated.revision, expected_revision);
    }

    let reloaded = ctx.engine.get_order(&order.id).await.unwrap();
    assert_eq!(reloaded.order.status, OrderStatus::Served);
}

#[tokio::test]
async fn test_disallowed_edges_are_invalid_state() {
    let ctx = setup().await;
    let scope = TenantScope::Platform;

    // No resurrecting a cancelled order
    let cancelled = place(&ctx).await;
    ctx.engine
        .set_status(&cancelled.id, OrderStatus::Cancelled, &scope)
        .await
        .unwrap();
    let result = ctx
        .engine
        .set_status(&cancelled.id, OrderStatus::Accepted, &scope)
        .await;
    assert!(matches!(result, Err(DomainError::InvalidState(_))));

    // No backward moves
    let order = place(&ctx).await;
    ctx.engine
        .set_status(&order.id, OrderStatus::Preparing, &scope)
        .await
        .unwrap();
    let result = ctx
        .engine
        .set_status(&order.id, OrderStatus::Accepted, &scope)
        .await;
    assert!(matches!(result, Err(DomainError::InvalidState(_))));
}

#[tokio::test]
async fn test_tenant_scope_is_enforced() {
    let ctx = setup().await;
    let order = place(&ctx).await;

    let foreign = TenantScope::Restaurant("another-restaurant".to_string());
    let result = ctx
        .engine
        .set_status(&order.id, OrderStatus::Accepted, &foreign)
        .await;
    assert!(matches!(result, Err(DomainError::Authorization(_))));

    // Platform scope bypasses the tenant check
    ctx.engine
        .set_status(&order.id, OrderStatus::Accepted, &TenantScope::Platform)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_find_active_order_tracks_pending_status() {
    let ctx = setup().await;

    assert!(ctx
        .engine
        .find_active_order(&ctx.restaurant_id, &ctx.table_id)
        .await
        .unwrap()
        .is_none());

    let order = place(&ctx).await;
    let active = ctx
        .engine
        .find_active_order(&ctx.restaurant_id, &ctx.table_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(active.order.id, order.id);
    assert_eq!(active.lines.len(), 1);

    // Leaving Pending clears the active slot
    ctx.engine
        .set_status(&order.id, OrderStatus::Accepted, &TenantScope::Platform)
        .await
        .unwrap();
    assert!(ctx
        .engine
        .find_active_order(&ctx.restaurant_id, &ctx.table_id)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_list_orders_newest_first_with_status_filter() {
    let ctx = setup().await;
    let first = place(&ctx).await;
    let second = place(&ctx).await;
    ctx.engine
        .set_status(&first.id, OrderStatus::Accepted, &TenantScope::Platform)
        .await
        .unwrap();

    let all = ctx
        .engine
        .list_orders(&ctx.restaurant_id, None, 50, 0)
        .await
        .unwrap();
    assert_eq!(all.len(), 2);

    let pending = ctx
        .engine
        .list_orders(&ctx.restaurant_id, Some(OrderStatus::Pending), 50, 0)
        .await
        .unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, second.id);

    // Another tenant sees nothing
    let other = ctx
        .engine
        .list_orders("another-restaurant", None, 50, 0)
        .await
        .unwrap();
    assert!(other.is_empty());
}

#[tokio::test]
async fn test_list_orders_clamps_page_bounds() {
    let ctx = setup().await;
    place(&ctx).await;
    place(&ctx).await;

    // SQLite would read LIMIT -1 as unlimited
    let page = ctx
        .engine
        .list_orders(&ctx.restaurant_id, None, -1, 0)
        .await
        .unwrap();
    assert_eq!(page.len(), 1);

    let page = ctx
        .engine
        .list_orders(&ctx.restaurant_id, None, 50, -10)
        .await
        .unwrap();
    assert_eq!(page.len(), 2);
}

#[tokio::test]
async fn test_status_change_publishes_change() {
    let ctx = setup().await;
    let order = place(&ctx).await;
    let mut rx = ctx.feed.subscribe();

    ctx.engine
        .set_status(&order.id, OrderStatus::Accepted, &TenantScope::Platform)
        .await
        .unwrap();

    let change = rx.recv().await.unwrap();
    assert_eq!(change.action, OrderChangeAction::StatusChanged);
    assert_eq!(change.status, OrderStatus::Accepted);
    assert_eq!(change.revision, 2);
}

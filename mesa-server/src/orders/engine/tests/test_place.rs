use super::*;
use shared::models::MenuItemUpdate;

#[tokio::test]
async fn test_place_order_totals_and_lines() {
    let ctx = setup().await;

    let placed = ctx
        .engine
        .place_order(
            &ctx.restaurant_id,
            &ctx.table_id,
            Some("sess-1"),
            vec![line_for(&ctx.paella, 2), line_for(&ctx.coffee, 1)],
        )
        .await
        .unwrap();

    assert_eq!(placed.order.status, OrderStatus::Pending);
    assert_eq!(placed.order.revision, 1);
    assert_eq!(placed.order.total_amount, dec("12.50"));
    assert_eq!(placed.order.session_id.as_deref(), Some("sess-1"));
    assert_eq!(placed.lines.len(), 2);
    assert_eq!(placed.lines[0].name_at_order, "Paella");
    assert_eq!(placed.lines[0].quantity, 2);
}

#[tokio::test]
async fn test_snapshots_survive_menu_edits_and_deletion() {
    let ctx = setup().await;

    let placed = ctx
        .engine
        .place_order(
            &ctx.restaurant_id,
            &ctx.table_id,
            Some("sess-1"),
            vec![line_for(&ctx.paella, 1)],
        )
        .await
        .unwrap();

    // Raise the live menu price, then delete the item outright
    let items = MenuItemRepository::new(ctx.pool.clone());
    items
        .update(
            &ctx.paella.id,
            MenuItemUpdate {
                name: None,
                description: None,
                price: Some(dec("99.00")),
                category_id: None,
                is_available: None,
                position: None,
            },
        )
        .await
        .unwrap();
    items.delete(&ctx.paella.id).await.unwrap();

    let reloaded = ctx.engine.get_order(&placed.order.id).await.unwrap();
    assert_eq!(reloaded.lines[0].price_at_order, dec("5.00"));
    assert_eq!(reloaded.lines[0].name_at_order, "Paella");
    // Soft reference went null, the snapshot stayed
    assert!(reloaded.lines[0].menu_item_id.is_none());
    assert_eq!(reloaded.order.total_amount, dec("5.00"));
}

#[tokio::test]
async fn test_empty_lines_rejected_without_order_row() {
    let ctx = setup().await;

    let result = ctx
        .engine
        .place_order(&ctx.restaurant_id, &ctx.table_id, Some("sess-1"), vec![])
        .await;

    assert!(matches!(result, Err(DomainError::Validation(_))));
    assert_eq!(order_count(&ctx.pool).await, 0);
}

#[tokio::test]
async fn test_non_positive_quantity_is_validation() {
    let ctx = setup().await;

    for qty in [0, -1] {
        let result = ctx
            .engine
            .place_order(
                &ctx.restaurant_id,
                &ctx.table_id,
                Some("sess-1"),
                vec![line_for(&ctx.coffee, qty)],
            )
            .await;

        // Caught before the store, not surfaced as a constraint error
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }
    assert_eq!(order_count(&ctx.pool).await, 0);
}

#[tokio::test]
async fn test_unknown_table_is_not_found() {
    let ctx = setup().await;

    let result = ctx
        .engine
        .place_order(
            &ctx.restaurant_id,
            "no-such-table",
            Some("sess-1"),
            vec![line_for(&ctx.coffee, 1)],
        )
        .await;

    assert!(matches!(result, Err(DomainError::NotFound(_))));
}

#[tokio::test]
async fn test_table_of_another_restaurant_rejected() {
    let ctx = setup().await;

    let other = RestaurantRepository::new(ctx.pool.clone())
        .create(RestaurantCreate {
            name: "La Otra".to_string(),
            slug: "la-otra".to_string(),
        })
        .await
        .unwrap();
    let foreign_table = DiningTableRepository::new(ctx.pool.clone())
        .create(
            &other.id,
            DiningTableCreate {
                name: "Mesa 9".to_string(),
            },
        )
        .await
        .unwrap();

    let result = ctx
        .engine
        .place_order(
            &ctx.restaurant_id,
            &foreign_table.id,
            Some("sess-1"),
            vec![line_for(&ctx.coffee, 1)],
        )
        .await;

    assert!(matches!(result, Err(DomainError::Validation(_))));
    assert_eq!(order_count(&ctx.pool).await, 0);
}

#[tokio::test]
async fn test_failed_line_insert_leaves_no_orphan_order() {
    let ctx = setup().await;

    // Second line references a menu item that does not exist, so its
    // insert fails on the foreign key after the order row was created
    let bad_line = LineInput {
        menu_item_id: "ghost-item".to_string(),
        name: "Ghost".to_string(),
        price: dec("1.00"),
        quantity: 1,
        notes: None,
    };
    let result = ctx
        .engine
        .place_order(
            &ctx.restaurant_id,
            &ctx.table_id,
            Some("sess-1"),
            vec![line_for(&ctx.coffee, 1), bad_line],
        )
        .await;

    assert!(result.is_err());
    assert_eq!(order_count(&ctx.pool).await, 0);
    assert_eq!(line_count(&ctx.pool).await, 0);
}

#[tokio::test]
async fn test_place_order_publishes_created_change() {
    let ctx = setup().await;
    let mut rx = ctx.feed.subscribe();

    let placed = ctx
        .engine
        .place_order(
            &ctx.restaurant_id,
            &ctx.table_id,
            Some("sess-1"),
            vec![line_for(&ctx.coffee, 1)],
        )
        .await
        .unwrap();

    let change = rx.recv().await.unwrap();
    assert_eq!(change.action, OrderChangeAction::Created);
    assert_eq!(change.order_id, placed.order.id);
    assert_eq!(change.restaurant_id, ctx.restaurant_id);
    assert_eq!(change.revision, 1);
}

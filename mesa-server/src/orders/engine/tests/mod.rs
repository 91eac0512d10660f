use super::*;
use crate::db;
use crate::db::repository::{DiningTableRepository, MenuItemRepository, RestaurantRepository};
use rust_decimal::Decimal;
use shared::models::{DiningTableCreate, MenuItem, MenuItemCreate, RestaurantCreate};

mod test_lifecycle;
mod test_place;

// ========================================================================
// Shared fixtures: in-memory database seeded with one restaurant,
// one table, and a small menu
// ========================================================================

struct TestContext {
    engine: OrderEngine,
    feed: OrderFeed,
    pool: SqlitePool,
    restaurant_id: String,
    table_id: String,
    coffee: MenuItem,
    paella: MenuItem,
}

async fn setup() -> TestContext {
    let pool = db::connect_memory().await;

    let restaurant = RestaurantRepository::new(pool.clone())
        .create(RestaurantCreate {
            name: "Casa Pepe".to_string(),
            slug: "casa-pepe".to_string(),
        })
        .await
        .unwrap();

    let table = DiningTableRepository::new(pool.clone())
        .create(
            &restaurant.id,
            DiningTableCreate {
                name: "Mesa 1".to_string(),
            },
        )
        .await
        .unwrap();

    let items = MenuItemRepository::new(pool.clone());
    let coffee = items
        .create(&restaurant.id, menu_item_create("Café", "2.50"))
        .await
        .unwrap();
    let paella = items
        .create(&restaurant.id, menu_item_create("Paella", "5.00"))
        .await
        .unwrap();

    let feed = OrderFeed::new(16);
    let engine = OrderEngine::new(pool.clone(), feed.clone());

    TestContext {
        engine,
        feed,
        pool,
        restaurant_id: restaurant.id,
        table_id: table.id,
        coffee,
        paella,
    }
}

fn menu_item_create(name: &str, price: &str) -> MenuItemCreate {
    MenuItemCreate {
        name: name.to_string(),
        description: None,
        price: price.parse().unwrap(),
        category_id: None,
        is_available: None,
        position: None,
    }
}

fn line_for(item: &MenuItem, quantity: i32) -> LineInput {
    LineInput {
        menu_item_id: item.id.clone(),
        name: item.name.clone(),
        price: item.price,
        quantity,
        notes: None,
    }
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

async fn order_count(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM orders")
        .fetch_one(pool)
        .await
        .unwrap()
}

async fn line_count(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM order_items")
        .fetch_one(pool)
        .await
        .unwrap()
}

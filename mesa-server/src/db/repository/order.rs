//! Order persistence
//!
//! Free functions generic over the executor, so the engine can run
//! single statements on the pool and line replacement inside one
//! transaction. All status/lifecycle rules live in the engine; this
//! module only reads and writes rows.

use crate::db::models::{OrderLineRow, OrderRow};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::order::{Order, OrderLine, OrderStatus};
use shared::DomainResult;
use sqlx::{Sqlite, SqlitePool};

const ORDER_COLUMNS: &str =
    "id, restaurant_id, table_id, status, total_amount, revision, session_id, created_at, updated_at";
const LINE_COLUMNS: &str =
    "id, order_id, menu_item_id, name_at_order, price_at_order, quantity, notes";

pub async fn insert_order<'e, E>(executor: E, order: &Order) -> DomainResult<()>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    sqlx::query(&format!(
        "INSERT INTO orders ({ORDER_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)"
    ))
    .bind(&order.id)
    .bind(&order.restaurant_id)
    .bind(&order.table_id)
    .bind(order.status.as_str())
    .bind(order.total_amount.to_string())
    .bind(order.revision)
    .bind(&order.session_id)
    .bind(order.created_at)
    .bind(order.updated_at)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn insert_line<'e, E>(executor: E, line: &OrderLine) -> DomainResult<()>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    sqlx::query(&format!(
        "INSERT INTO order_items ({LINE_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?)"
    ))
    .bind(&line.id)
    .bind(&line.order_id)
    .bind(&line.menu_item_id)
    .bind(&line.name_at_order)
    .bind(line.price_at_order.to_string())
    .bind(line.quantity)
    .bind(&line.notes)
    .execute(executor)
    .await?;
    Ok(())
}

/// Compensating cleanup after a failed multi-step placement
pub async fn delete_order<'e, E>(executor: E, order_id: &str) -> DomainResult<()>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    sqlx::query("DELETE FROM orders WHERE id = ?")
        .bind(order_id)
        .execute(executor)
        .await?;
    Ok(())
}

pub async fn delete_lines<'e, E>(executor: E, order_id: &str) -> DomainResult<()>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    sqlx::query("DELETE FROM order_items WHERE order_id = ?")
        .bind(order_id)
        .execute(executor)
        .await?;
    Ok(())
}

pub async fn update_totals<'e, E>(
    executor: E,
    order_id: &str,
    total_amount: &Decimal,
    revision: i64,
    updated_at: DateTime<Utc>,
) -> DomainResult<()>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    sqlx::query("UPDATE orders SET total_amount = ?, revision = ?, updated_at = ? WHERE id = ?")
        .bind(total_amount.to_string())
        .bind(revision)
        .bind(updated_at)
        .bind(order_id)
        .execute(executor)
        .await?;
    Ok(())
}

pub async fn update_status<'e, E>(
    executor: E,
    order_id: &str,
    status: OrderStatus,
    revision: i64,
    updated_at: DateTime<Utc>,
) -> DomainResult<()>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    sqlx::query("UPDATE orders SET status = ?, revision = ?, updated_at = ? WHERE id = ?")
        .bind(status.as_str())
        .bind(revision)
        .bind(updated_at)
        .bind(order_id)
        .execute(executor)
        .await?;
    Ok(())
}

pub async fn find_by_id(pool: &SqlitePool, order_id: &str) -> DomainResult<Option<Order>> {
    let row = sqlx::query_as::<_, OrderRow>(&format!(
        "SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?"
    ))
    .bind(order_id)
    .fetch_optional(pool)
    .await?;
    row.map(Order::try_from).transpose()
}

pub async fn find_lines(pool: &SqlitePool, order_id: &str) -> DomainResult<Vec<OrderLine>> {
    let rows = sqlx::query_as::<_, OrderLineRow>(&format!(
        "SELECT {LINE_COLUMNS} FROM order_items WHERE order_id = ? ORDER BY rowid"
    ))
    .bind(order_id)
    .fetch_all(pool)
    .await?;
    rows.into_iter().map(OrderLine::try_from).collect()
}

/// Most recent pending order for a table, if any
pub async fn find_active(
    pool: &SqlitePool,
    restaurant_id: &str,
    table_id: &str,
) -> DomainResult<Option<Order>> {
    let row = sqlx::query_as::<_, OrderRow>(&format!(
        "SELECT {ORDER_COLUMNS} FROM orders WHERE restaurant_id = ? AND table_id = ? AND status = 'PENDING' ORDER BY created_at DESC LIMIT 1"
    ))
    .bind(restaurant_id)
    .bind(table_id)
    .fetch_optional(pool)
    .await?;
    row.map(Order::try_from).transpose()
}

const MAX_PAGE_SIZE: i32 = 200;

/// Tenant order listing, newest first
///
/// `limit`/`offset` come from the query string; out-of-range values
/// are clamped (SQLite reads `LIMIT -1` as unlimited).
pub async fn list(
    pool: &SqlitePool,
    restaurant_id: &str,
    status: Option<OrderStatus>,
    limit: i32,
    offset: i32,
) -> DomainResult<Vec<Order>> {
    let limit = limit.clamp(1, MAX_PAGE_SIZE);
    let offset = offset.max(0);
    let rows = match status {
        Some(status) => {
            sqlx::query_as::<_, OrderRow>(&format!(
                "SELECT {ORDER_COLUMNS} FROM orders WHERE restaurant_id = ? AND status = ? ORDER BY created_at DESC LIMIT ? OFFSET ?"
            ))
            .bind(restaurant_id)
            .bind(status.as_str())
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, OrderRow>(&format!(
                "SELECT {ORDER_COLUMNS} FROM orders WHERE restaurant_id = ? ORDER BY created_at DESC LIMIT ? OFFSET ?"
            ))
            .bind(restaurant_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?
        }
    };
    rows.into_iter().map(Order::try_from).collect()
}

//! Order API handlers

use std::convert::Infallible;

use axum::extract::{Path, Query, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::{Extension, Json};
use futures::stream::Stream;
use serde::Deserialize;
use shared::order::{LineInput, Order, OrderChange, OrderStatus, OrderWithLines};
use shared::ApiResponse;
use tokio::sync::broadcast;

use crate::auth::{CurrentUser, TableSession};
use crate::core::ServerState;
use crate::orders::TenantScope;
use crate::utils::{AppError, AppResult};

// ========================================================================
// Customer surface
// ========================================================================

#[derive(Debug, Deserialize)]
pub struct PlaceOrderRequest {
    pub lines: Vec<LineInput>,
}

pub async fn place(
    State(state): State<ServerState>,
    Extension(session): Extension<TableSession>,
    Json(payload): Json<PlaceOrderRequest>,
) -> AppResult<Json<ApiResponse<OrderWithLines>>> {
    let placed = state
        .engine
        .place_order(
            &session.restaurant_id,
            &session.table_id,
            Some(&session.token),
            payload.lines,
        )
        .await?;
    Ok(Json(ApiResponse::ok(placed)))
}

/// The table's current pending order, if any
pub async fn active(
    State(state): State<ServerState>,
    Extension(session): Extension<TableSession>,
) -> AppResult<Json<ApiResponse<Option<OrderWithLines>>>> {
    let active = state
        .engine
        .find_active_order(&session.restaurant_id, &session.table_id)
        .await?;
    Ok(Json(ApiResponse::ok(active)))
}

/// Load an order owned by this session. Foreign orders answer 404 so
/// order ids never leak across tables.
async fn owned_order(
    state: &ServerState,
    session: &TableSession,
    order_id: &str,
) -> Result<OrderWithLines, AppError> {
    let order = state.engine.get_order(order_id).await?;
    if order.order.session_id.as_deref() != Some(session.token.as_str()) {
        return Err(AppError::not_found(format!("Order {order_id} not found")));
    }
    Ok(order)
}

pub async fn get_own(
    State(state): State<ServerState>,
    Extension(session): Extension<TableSession>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<OrderWithLines>>> {
    let order = owned_order(&state, &session, &id).await?;
    Ok(Json(ApiResponse::ok(order)))
}

#[derive(Debug, Deserialize)]
pub struct UpdateOrderRequest {
    /// Revision the client last saw; mismatch answers 409
    pub expected_revision: i64,
    pub lines: Vec<LineInput>,
}

pub async fn update(
    State(state): State<ServerState>,
    Extension(session): Extension<TableSession>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateOrderRequest>,
) -> AppResult<Json<ApiResponse<OrderWithLines>>> {
    let updated = state
        .engine
        .update_order(&id, payload.expected_revision, &session.token, payload.lines)
        .await?;
    Ok(Json(ApiResponse::ok(updated)))
}

/// SSE feed for one order (customer status view)
pub async fn order_feed(
    State(state): State<ServerState>,
    Extension(session): Extension<TableSession>,
    Path(id): Path<String>,
) -> AppResult<Sse<impl Stream<Item = Result<Event, Infallible>>>> {
    owned_order(&state, &session, &id).await?;

    let rx = state.feed.subscribe();
    let stream = change_stream(rx, move |change| change.order_id == id);
    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}

// ========================================================================
// Admin surface
// ========================================================================

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: i32,
    #[serde(default)]
    pub offset: i32,
    pub status: Option<OrderStatus>,
    /// Platform operators must name the tenant they are inspecting
    pub restaurant_id: Option<String>,
}

fn default_limit() -> i32 {
    50
}

/// Resolve which tenant an admin request targets
fn target_tenant(user: &CurrentUser, requested: Option<String>) -> Result<String, AppError> {
    let scope = user
        .scope()
        .ok_or_else(|| AppError::forbidden("No restaurant bound to this account"))?;
    match (scope, requested) {
        (TenantScope::Platform, Some(id)) => Ok(id),
        (TenantScope::Platform, None) => Err(AppError::validation(
            "restaurant_id is required for platform accounts",
        )),
        (TenantScope::Restaurant(own), requested) => {
            if requested.is_some_and(|id| id != own) {
                return Err(AppError::forbidden("Cannot inspect another restaurant"));
            }
            Ok(own)
        }
    }
}

pub async fn list(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiResponse<Vec<Order>>>> {
    let restaurant_id = target_tenant(&user, query.restaurant_id)?;
    let orders = state
        .engine
        .list_orders(&restaurant_id, query.status, query.limit, query.offset)
        .await?;
    Ok(Json(ApiResponse::ok(orders)))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<OrderWithLines>>> {
    let scope = user
        .scope()
        .ok_or_else(|| AppError::forbidden("No restaurant bound to this account"))?;
    let order = state.engine.get_order(&id).await?;
    if !scope.allows(&order.order.restaurant_id) {
        return Err(AppError::not_found(format!("Order {id} not found")));
    }
    Ok(Json(ApiResponse::ok(order)))
}

#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: OrderStatus,
}

pub async fn set_status(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<SetStatusRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let scope = user
        .scope()
        .ok_or_else(|| AppError::forbidden("No restaurant bound to this account"))?;
    let order = state.engine.set_status(&id, payload.status, &scope).await?;
    Ok(Json(ApiResponse::ok(order)))
}

/// SSE feed of all order changes visible to this admin
pub async fn feed(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Sse<impl Stream<Item = Result<Event, Infallible>>>> {
    let scope = user
        .scope()
        .ok_or_else(|| AppError::forbidden("No restaurant bound to this account"))?;

    let rx = state.feed.subscribe();
    let stream = change_stream(rx, move |change| scope.allows(&change.restaurant_id));
    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}

// ========================================================================
// SSE plumbing
// ========================================================================

/// Turn a broadcast receiver into a filtered SSE event stream
///
/// Lagged subscribers skip missed events and keep going; observers
/// re-fetch on every event anyway, so gaps are harmless.
fn change_stream(
    rx: broadcast::Receiver<OrderChange>,
    filter: impl Fn(&OrderChange) -> bool + Send + 'static,
) -> impl Stream<Item = Result<Event, Infallible>> {
    futures::stream::unfold((rx, filter), |(mut rx, filter)| async move {
        loop {
            match rx.recv().await {
                Ok(change) => {
                    if !filter(&change) {
                        continue;
                    }
                    match Event::default().event("order_change").json_data(&change) {
                        Ok(event) => return Some((Ok(event), (rx, filter))),
                        Err(e) => {
                            tracing::error!(error = %e, "Failed to encode order change");
                            continue;
                        }
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Order feed subscriber lagged");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    })
}

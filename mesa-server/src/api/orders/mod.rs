//! Order API
//!
//! Split into two routers: the customer surface (table-session gate)
//! for placing and editing orders, and the admin surface (JWT gate)
//! for the dashboard and status transitions. All mutations go through
//! the order engine.

mod handler;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::core::ServerState;

/// Customer routes, mounted behind the session middleware
pub fn customer_router() -> Router<ServerState> {
    Router::new().nest("/api/orders", customer_routes())
}

fn customer_routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::place))
        .route("/active", get(handler::active))
        .route("/{id}", get(handler::get_own).put(handler::update))
        .route("/{id}/feed", get(handler::order_feed))
}

/// Admin routes, mounted behind the JWT middleware
pub fn admin_router() -> Router<ServerState> {
    Router::new().nest("/api/admin/orders", admin_routes())
}

fn admin_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/feed", get(handler::feed))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/status", put(handler::set_status))
}

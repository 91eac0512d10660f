//! Table session API
//!
//! Public endpoint: a customer who scanned a table QR code exchanges
//! the table code for a session token. Everything order-related on
//! the customer side requires that token afterwards.

mod handler;

use axum::{routing::post, Router};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/sessions", post(handler::create_session))
}

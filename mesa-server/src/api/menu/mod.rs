//! Public menu API
//!
//! Read-only menu view for customers, keyed by table code. No session
//! needed: browsing the menu is open, ordering is not.

mod handler;

use axum::{routing::get, Router};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/menu/{table_code}", get(handler::get_menu))
}

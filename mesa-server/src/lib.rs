//! Mesa server — multi-tenant restaurant ordering backend
//!
//! Customers scan a table QR code, browse the menu, and place orders
//! through a table-session token; restaurant staff drive each order
//! through its lifecycle from an admin dashboard. Order changes fan
//! out over an in-process broadcast feed exposed as SSE.

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod orders;
pub mod utils;

pub use core::{build_router, Config, Server, ServerState};
pub use utils::{AppError, AppResult};

/// Load `.env` and initialize logging; call once at startup
pub fn setup_environment(config: &Config) -> std::io::Result<()> {
    config.ensure_work_dir_structure()?;
    let logs_dir = config.logs_dir();
    utils::init_logger_with_file(None, logs_dir.to_str());
    Ok(())
}

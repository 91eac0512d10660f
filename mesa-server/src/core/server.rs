//! HTTP server assembly and lifecycle

use axum::{middleware, Router};
use shared::{DomainError, DomainResult};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::auth;
use crate::core::{Config, ServerState};

pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Create server with existing state (tests, embedded setups)
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    pub async fn run(&self) -> DomainResult<()> {
        let state = match &self.state {
            Some(s) => s.clone(),
            None => ServerState::initialize(&self.config).await?,
        };

        let app = build_router(state);
        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        tracing::info!("Mesa server listening on {addr}");

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| DomainError::transport(format!("Failed to bind {addr}: {e}")))?;

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| DomainError::transport(format!("Server error: {e}")))
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("Shutting down...");
}

/// Assemble the full router
///
/// Three zones: public (health, session minting, menu read), admin
/// (JWT gate), and customer (table-session gate).
pub fn build_router(state: ServerState) -> Router {
    let admin = Router::new()
        .merge(api::restaurants::router())
        .merge(api::categories::router())
        .merge(api::menu_items::router())
        .merge(api::tables::router())
        .merge(api::orders::admin_router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::middleware::require_admin,
        ));

    let customer = Router::new()
        .merge(api::orders::customer_router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::middleware::require_session,
        ));

    Router::new()
        .merge(api::health::router())
        .merge(api::sessions::router())
        .merge(api::menu::router())
        .merge(admin)
        .merge(customer)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

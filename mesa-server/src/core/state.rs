//! Server state — shared handles for all services
//!
//! Cloning is cheap: the pool is an internal Arc and the rest are
//! explicit Arcs. One instance is built at startup and handed to the
//! router as axum state.

use std::sync::Arc;

use shared::{DomainError, DomainResult};
use sqlx::SqlitePool;

use crate::auth::{JwtService, SessionService};
use crate::core::Config;
use crate::db;
use crate::orders::{OrderEngine, OrderFeed};

#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub pool: SqlitePool,
    pub engine: Arc<OrderEngine>,
    pub feed: OrderFeed,
    pub jwt_service: Arc<JwtService>,
    pub sessions: Arc<SessionService>,
}

impl ServerState {
    /// Initialize the work directory, database, and services
    pub async fn initialize(config: &Config) -> DomainResult<Self> {
        config
            .ensure_work_dir_structure()
            .map_err(|e| DomainError::transport(format!("Failed to create work dir: {e}")))?;

        let pool = db::connect(&config.database_url()).await?;
        let feed = OrderFeed::new(config.feed_capacity);
        let engine = Arc::new(OrderEngine::new(pool.clone(), feed.clone()));
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let sessions = Arc::new(SessionService::new(config.session_ttl_minutes));

        Ok(Self {
            config: config.clone(),
            pool,
            engine,
            feed,
            jwt_service,
            sessions,
        })
    }
}

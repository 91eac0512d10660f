//! Server configuration
//!
//! All settings come from environment variables with defaults:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | MESA_WORK_DIR | /var/lib/mesa | Work directory (database, logs) |
//! | HTTP_PORT | 3000 | HTTP API port |
//! | DATABASE_URL | sqlite:<work_dir>/database/mesa.db | SQLite URL |
//! | ENVIRONMENT | development | development \| staging \| production |
//! | SESSION_TTL_MINUTES | 240 | Customer table-session lifetime |
//! | FEED_CAPACITY | 256 | Order feed broadcast buffer |
//! | JWT_SECRET / JWT_* | see `auth::jwt` | Admin token settings |

use crate::auth::JwtConfig;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub work_dir: String,
    pub http_port: u16,
    /// Explicit override; `database_url()` falls back to the work dir
    pub database_url: Option<String>,
    pub environment: String,
    pub jwt: JwtConfig,
    pub session_ttl_minutes: i64,
    pub feed_capacity: usize,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("MESA_WORK_DIR").unwrap_or_else(|_| "/var/lib/mesa".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database_url: std::env::var("DATABASE_URL").ok(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            jwt: JwtConfig::default(),
            session_ttl_minutes: std::env::var("SESSION_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(240),
            feed_capacity: std::env::var("FEED_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(256),
        }
    }

    pub fn database_url(&self) -> String {
        self.database_url
            .clone()
            .unwrap_or_else(|| format!("sqlite:{}/database/mesa.db", self.work_dir))
    }

    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    pub fn logs_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// Create the work directory layout if missing
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.logs_dir())?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

//! Authentication and authorization
//!
//! Admins authenticate with JWT bearer tokens; customers hold
//! short-lived table-session tokens minted from a table code.

pub mod jwt;
pub mod middleware;
pub mod session;
pub mod user;

pub use jwt::{Claims, JwtConfig, JwtError, JwtService};
pub use middleware::SESSION_TOKEN_HEADER;
pub use session::{SessionService, TableSession};
pub use user::{CurrentUser, ROLE_ADMIN, ROLE_PLATFORM};

//! Shared types for the Mesa ordering platform
//!
//! Common types used across the server and cart crates: tenant-scoped
//! data models, the order status machine, line item snapshots, and the
//! unified domain error.

pub mod error;
pub mod models;
pub mod order;
pub mod response;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{DomainError, DomainResult};
pub use response::ApiResponse;

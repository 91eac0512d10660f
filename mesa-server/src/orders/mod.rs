//! Order lifecycle engine and change feed

pub mod engine;
pub mod feed;

pub use engine::{OrderEngine, TenantScope};
pub use feed::OrderFeed;

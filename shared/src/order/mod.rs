//! Order domain types
//!
//! The order status machine, line item snapshots, and the change
//! notification event broadcast after every successful mutation.

mod change;
mod line;
mod status;

pub use change::{OrderChange, OrderChangeAction};
pub use line::{total_of, LineInput, Order, OrderLine, OrderWithLines};
pub use status::OrderStatus;

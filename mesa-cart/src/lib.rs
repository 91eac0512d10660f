//! Mesa Cart — customer-side cart manager
//!
//! Holds the customer's working selection for one table session,
//! keyed by `(restaurant, table)`, and persists it through an
//! injectable key-value store so a page reload replays the same cart.
//! On load the cart reconciles against any pending order for the
//! table; local edits always win over a background refresh.

mod cart;
mod error;
mod manager;
mod store;
mod watch;

pub use cart::{Cart, CartKey, CartLine};
pub use error::{CartError, CartResult};
pub use manager::CartManager;
pub use store::{CartStore, MemoryCartStore, RedbCartStore};
pub use watch::ActiveOrderGuard;

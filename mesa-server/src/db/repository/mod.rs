//! Repositories — one module per table
//!
//! Tenant-scoped queries always filter by `restaurant_id`; callers
//! pass the tenant they resolved from the JWT or table session.

pub mod category;
pub mod dining_table;
pub mod menu_item;
pub mod order;
pub mod restaurant;

pub use category::CategoryRepository;
pub use dining_table::DiningTableRepository;
pub use menu_item::MenuItemRepository;
pub use restaurant::RestaurantRepository;

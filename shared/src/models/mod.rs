//! Data models for the Mesa ordering platform
//!
//! Each model file contains the entity plus its Create/Update payloads.

mod category;
mod dining_table;
mod menu_item;
mod restaurant;

pub use category::{MenuCategory, MenuCategoryCreate, MenuCategoryUpdate};
pub use dining_table::{DiningTable, DiningTableCreate, DiningTableUpdate};
pub use menu_item::{MenuItem, MenuItemCreate, MenuItemUpdate};
pub use restaurant::{Restaurant, RestaurantCreate};

//! HTTP API modules
//!
//! One module per resource, each exposing `router()` (and, for
//! orders, separate admin/customer routers). Assembly and middleware
//! layering happen in `core::server`.

pub mod categories;
pub mod health;
pub mod menu;
pub mod menu_items;
pub mod orders;
pub mod restaurants;
pub mod sessions;
pub mod tables;

use crate::auth::CurrentUser;
use crate::utils::AppError;

/// Tenant of the caller's token, for tenant-scoped admin CRUD
pub(crate) fn tenant_of(user: &CurrentUser) -> Result<String, AppError> {
    user.restaurant_id
        .clone()
        .ok_or_else(|| AppError::forbidden("No restaurant bound to this account"))
}

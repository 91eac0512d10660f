//! Authenticated admin identity

use crate::auth::jwt::Claims;
use crate::orders::TenantScope;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_PLATFORM: &str = "platform";

/// Authenticated admin, injected into request extensions by the auth
/// middleware
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
    pub username: String,
    pub restaurant_id: Option<String>,
    pub role: String,
}

impl CurrentUser {
    pub fn is_platform(&self) -> bool {
        self.role == ROLE_PLATFORM
    }

    /// Tenant scope for order operations. `None` for a restaurant
    /// admin whose token carries no tenant binding (misissued token).
    pub fn scope(&self) -> Option<TenantScope> {
        if self.is_platform() {
            return Some(TenantScope::Platform);
        }
        self.restaurant_id
            .clone()
            .map(TenantScope::Restaurant)
    }
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            username: claims.username,
            restaurant_id: claims.restaurant_id,
            role: claims.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: &str, restaurant_id: Option<&str>) -> CurrentUser {
        CurrentUser {
            id: "user-1".to_string(),
            username: "ana".to_string(),
            restaurant_id: restaurant_id.map(str::to_string),
            role: role.to_string(),
        }
    }

    #[test]
    fn test_platform_scope_allows_any_tenant() {
        let scope = user(ROLE_PLATFORM, None).scope().unwrap();
        assert!(scope.allows("rest-1"));
        assert!(scope.allows("rest-2"));
    }

    #[test]
    fn test_admin_scope_restricted_to_own_tenant() {
        let scope = user(ROLE_ADMIN, Some("rest-1")).scope().unwrap();
        assert!(scope.allows("rest-1"));
        assert!(!scope.allows("rest-2"));
    }

    #[test]
    fn test_admin_without_tenant_has_no_scope() {
        assert!(user(ROLE_ADMIN, None).scope().is_none());
    }
}

//! Catalog of guarded module routes.
//!
//! Add and edit screens of a module share the module's route for rights:
//! listing needs `can_view`, add needs `can_create`, edit needs `can_edit`.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScreenRoute {
    pub path: &'static str,
    pub title: &'static str,
    pub section: &'static str,
}

impl ScreenRoute {
    const fn new(path: &'static str, title: &'static str, section: &'static str) -> Self {
        Self {
            path,
            title,
            section,
        }
    }

    /// Base of the module's screens, e.g. "/branches-clients" for the branch list.
    pub fn base(&self) -> &'static str {
        match self.path[1..].find('/') {
            Some(pos) => &self.path[..pos + 1],
            None => self.path,
        }
    }
}

pub const BRANCHES: ScreenRoute =
    ScreenRoute::new("/branches-clients/branch-list", "Branches", "Branches & Clients");
pub const CLIENTS: ScreenRoute =
    ScreenRoute::new("/branches-clients/client-list", "Clients", "Branches & Clients");
pub const AGENTS: ScreenRoute = ScreenRoute::new("/agents/agent-list", "Agents", "Sales");
pub const COURIERS: ScreenRoute = ScreenRoute::new("/couriers/courier-list", "Couriers", "Operations");
pub const PRODUCTS: ScreenRoute = ScreenRoute::new("/products/product-list", "Products", "Catalog");
pub const PLANS: ScreenRoute = ScreenRoute::new("/products/plan-list", "Plans", "Catalog");
pub const COUPONS: ScreenRoute = ScreenRoute::new("/coupons/coupon-list", "Coupons", "Catalog");
pub const MOTOR_QUOTES: ScreenRoute =
    ScreenRoute::new("/motor-quotes/quote-list", "Motor Quotes", "Sales");
pub const ORDERS: ScreenRoute = ScreenRoute::new("/orders/order-list", "Orders", "Operations");
pub const CALL_US: ScreenRoute =
    ScreenRoute::new("/call-us/request-list", "Call-us Requests", "Operations");
pub const API_USER_PRODUCTS: ScreenRoute =
    ScreenRoute::new("/api-users/user-products", "API-user Products", "Administration");
pub const USERS: ScreenRoute =
    ScreenRoute::new("/users/user-list", "Users & Permissions", "Administration");
pub const DASHBOARD: ScreenRoute = ScreenRoute::new("/dashboard", "Dashboard", "Overview");

/// Every guarded route, in sidebar order.
pub const SCREEN_ROUTES: &[ScreenRoute] = &[
    DASHBOARD,
    BRANCHES,
    CLIENTS,
    AGENTS,
    MOTOR_QUOTES,
    COURIERS,
    ORDERS,
    CALL_US,
    PRODUCTS,
    PLANS,
    COUPONS,
    API_USER_PRODUCTS,
    USERS,
];

pub fn find(path: &str) -> Option<&'static ScreenRoute> {
    SCREEN_ROUTES.iter().find(|r| r.path == path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_and_base() {
        assert_eq!(find("/agents/agent-list"), Some(&AGENTS));
        assert_eq!(find("/agents/agent-add"), None);
        assert_eq!(BRANCHES.base(), "/branches-clients");
        assert_eq!(DASHBOARD.base(), "/dashboard");
    }

    #[test]
    fn test_routes_are_unique() {
        for (i, a) in SCREEN_ROUTES.iter().enumerate() {
            for b in &SCREEN_ROUTES[i + 1..] {
                assert_ne!(a.path, b.path);
            }
        }
    }
}

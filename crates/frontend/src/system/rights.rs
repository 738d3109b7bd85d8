//! Rights resolver: capability record of a route for the signed-in user.

use contracts::system::rights::{Capability, CapabilityRecord, PermissionTable};
use contracts::system::routes::{ScreenRoute, SCREEN_ROUTES};
use leptos::prelude::*;

use crate::system::auth::context::use_auth;

/// A route without an entry resolves to the empty record, which denies
/// everything
pub fn resolve(route: &str, table: &PermissionTable) -> CapabilityRecord {
    table.get(route).copied().unwrap_or_default()
}

/// Reactive record of `route`, recomputed on login, logout and refresh
pub fn use_rights(route: &'static str) -> Memo<CapabilityRecord> {
    let (auth_state, _) = use_auth();
    Memo::new(move |_| auth_state.with(|s| resolve(route, &s.rights)))
}

/// Catalogued screens the table lets the user view, in menu order
pub fn viewable_routes(table: &PermissionTable) -> Vec<&'static ScreenRoute> {
    SCREEN_ROUTES
        .iter()
        .filter(|r| resolve(r.path, table).allows(Capability::View))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::system::rights::RightFlag;
    use contracts::system::routes::{AGENTS, BRANCHES, ORDERS};

    fn table() -> PermissionTable {
        let mut table = PermissionTable::new();
        table.insert(
            AGENTS.path,
            CapabilityRecord {
                can_view: Some(RightFlag::Granted),
                can_edit: Some(RightFlag::Denied),
                ..Default::default()
            },
        );
        table.insert(
            ORDERS.path,
            CapabilityRecord {
                can_view: Some(RightFlag::Denied),
                ..Default::default()
            },
        );
        table
    }

    #[test]
    fn test_missing_route_is_empty_record() {
        let record = resolve(BRANCHES.path, &table());
        assert!(record.is_empty());
        assert!(!record.allows(Capability::View));
    }

    #[test]
    fn test_only_granted_flags_allow() {
        let record = resolve(AGENTS.path, &table());
        assert!(record.allows(Capability::View));
        assert!(!record.allows(Capability::Edit));
        assert!(!record.allows(Capability::Delete));
    }

    #[test]
    fn test_viewable_routes() {
        let routes: Vec<&str> = viewable_routes(&table()).iter().map(|r| r.path).collect();
        assert_eq!(routes, vec![AGENTS.path]);
        assert_eq!(
            viewable_routes(&PermissionTable::admin()).len(),
            SCREEN_ROUTES.len()
        );
    }
}

//! Queries and request bodies of the user administration screens.

use std::collections::BTreeMap;

use contracts::system::rights::{CapabilityRecord, UserRightRow, UserRightsDto};
use contracts::system::routes::SCREEN_ROUTES;

use crate::shared::api_utils::item_path;
use crate::shared::query::{Query, QueryKey};

pub const USERS_API: &str = "/api/system/users";

/// Cache resource of every user query; the lookup shares it
pub const RESOURCE: &str = "users";

pub fn users_query() -> Query {
    Query::new(QueryKey::new(RESOURCE).with("list"), USERS_API)
}

pub fn user_query(id: &str) -> Query {
    Query::new(QueryKey::new(RESOURCE).with("item").with(id), item_path(USERS_API, id))
}

pub fn rights_path(id: &str) -> String {
    format!("{}/rights", item_path(USERS_API, id))
}

pub fn rights_query(id: &str) -> Query {
    Query::new(QueryKey::new(RESOURCE).with("rights").with(id), rights_path(id))
}

/// Editable matrix of a user's stored rows, one record per catalogued route
pub fn matrix_from(dto: &UserRightsDto) -> BTreeMap<String, CapabilityRecord> {
    let mut matrix: BTreeMap<String, CapabilityRecord> = SCREEN_ROUTES
        .iter()
        .map(|r| (r.path.to_string(), CapabilityRecord::default()))
        .collect();
    for row in &dto.rows {
        matrix.insert(row.route.clone(), row.rights);
    }
    matrix
}

/// Body of the save. Routes with no flag set are left out.
pub fn rights_payload(user_id: &str, matrix: &BTreeMap<String, CapabilityRecord>) -> UserRightsDto {
    UserRightsDto {
        user_id: user_id.to_string(),
        rows: matrix
            .iter()
            .filter(|(_, record)| !record.is_empty())
            .map(|(route, record)| UserRightRow {
                route: route.clone(),
                rights: *record,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::system::rights::{Capability, RightFlag};
    use contracts::system::routes::{ORDERS, USERS};

    #[test]
    fn test_queries_share_the_users_resource() {
        assert_eq!(users_query().key.to_string(), "users/list");
        assert_eq!(user_query("u-1").path, "/api/system/users/u-1");
        assert_eq!(rights_query("u-1").path, "/api/system/users/u-1/rights");
        assert_eq!(rights_query("u-1").key.parts()[0], RESOURCE);
    }

    #[test]
    fn test_matrix_round_trip_drops_unset_routes() {
        let mut orders = CapabilityRecord::default();
        orders.set(Capability::View, Some(RightFlag::Granted));
        orders.set(Capability::Delete, Some(RightFlag::Denied));
        let dto = UserRightsDto {
            user_id: "u-1".into(),
            rows: vec![UserRightRow {
                route: ORDERS.path.into(),
                rights: orders,
            }],
        };

        let mut matrix = matrix_from(&dto);
        assert_eq!(matrix.len(), SCREEN_ROUTES.len());
        assert_eq!(matrix[ORDERS.path], orders);
        assert!(matrix[USERS.path].is_empty());

        matrix
            .get_mut(USERS.path)
            .unwrap()
            .set(Capability::View, Some(RightFlag::Denied));
        let payload = rights_payload("u-1", &matrix);
        let routes: Vec<_> = payload.rows.iter().map(|r| r.route.as_str()).collect();
        assert_eq!(routes.len(), 2);
        assert!(routes.contains(&ORDERS.path));
        assert!(routes.contains(&USERS.path));
    }
}

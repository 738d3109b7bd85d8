use contracts::system::auth::TokenClaims;
use contracts::system::rights::{Capability, CapabilityRecord, PermissionTable, UserRightRow};
use contracts::system::routes::{self, ScreenRoute};

use super::repository;
use crate::shared::error::{AppError, AppResult};

/// Build the permission table from stored rows; unknown routes are skipped
pub fn table_from_rows(rows: Vec<UserRightRow>) -> PermissionTable {
    let mut table = PermissionTable::new();
    for row in rows {
        if routes::find(&row.route).is_none() {
            tracing::warn!("Ignoring rights for unknown route {}", row.route);
            continue;
        }
        table.insert(row.route, row.rights);
    }
    table
}

/// Permission table of the signed-in user. Administrators get everything.
pub async fn permission_table(claims: &TokenClaims) -> anyhow::Result<PermissionTable> {
    if claims.is_admin {
        return Ok(PermissionTable::admin());
    }
    let rows = repository::list_for_user(&claims.sub).await?;
    Ok(table_from_rows(rows))
}

pub async fn capability_record(
    claims: &TokenClaims,
    route: &ScreenRoute,
) -> anyhow::Result<CapabilityRecord> {
    let table = permission_table(claims).await?;
    Ok(table.get(route.path).copied().unwrap_or_default())
}

/// Fail with 403 unless the user holds `capability` on `route`
pub async fn require(
    claims: &TokenClaims,
    route: &ScreenRoute,
    capability: Capability,
) -> AppResult<()> {
    if claims.is_admin {
        return Ok(());
    }
    let record = capability_record(claims, route).await?;
    if record.allows(capability) {
        Ok(())
    } else {
        tracing::warn!(
            "User {} denied {} on {}",
            claims.username,
            capability.label(),
            route.path
        );
        Err(AppError::forbidden())
    }
}

pub async fn rows_for_user(user_id: &str) -> anyhow::Result<Vec<UserRightRow>> {
    repository::list_for_user(user_id).await
}

/// Store a user's rows, rejecting routes outside the catalog
pub async fn save_rows(user_id: &str, rows: Vec<UserRightRow>) -> AppResult<()> {
    if let Some(unknown) = rows.iter().find(|r| routes::find(&r.route).is_none()) {
        return Err(AppError::Validation(format!(
            "Unknown screen route {}",
            unknown.route
        )));
    }
    repository::replace_for_user(user_id, &rows).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::system::rights::RightFlag;

    #[test]
    fn test_table_from_rows_skips_unknown_routes() {
        let rows = vec![
            UserRightRow {
                route: routes::AGENTS.path.to_string(),
                rights: CapabilityRecord {
                    can_view: Some(RightFlag::Granted),
                    can_edit: Some(RightFlag::Denied),
                    ..Default::default()
                },
            },
            UserRightRow {
                route: "/legacy/old-screen".to_string(),
                rights: CapabilityRecord::all_granted(),
            },
        ];
        let table = table_from_rows(rows);
        assert_eq!(table.len(), 1);
        let agents = table.get(routes::AGENTS.path).unwrap();
        assert!(agents.allows(Capability::View));
        assert!(!agents.allows(Capability::Edit));
    }
}

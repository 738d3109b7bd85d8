use anyhow::{Context, Result};
use contracts::system::rights::{CapabilityRecord, RightFlag, UserRightRow};
use sea_orm::{ConnectionTrait, DatabaseBackend, QueryResult, Statement, TransactionTrait};

use crate::shared::data::db::get_connection;

fn flag(row: &QueryResult, column: &str) -> Result<Option<RightFlag>> {
    let value: Option<String> = row.try_get("", column)?;
    Ok(value.as_deref().and_then(RightFlag::from_db))
}

fn row_from_query(row: &QueryResult) -> Result<UserRightRow> {
    Ok(UserRightRow {
        route: row.try_get("", "route")?,
        rights: CapabilityRecord {
            can_view: flag(row, "can_view")?,
            can_create: flag(row, "can_create")?,
            can_edit: flag(row, "can_edit")?,
            can_delete: flag(row, "can_delete")?,
        },
    })
}

/// Stored rows of one user, by route
pub async fn list_for_user(user_id: &str) -> Result<Vec<UserRightRow>> {
    let rows = get_connection()
        .query_all(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT route, can_view, can_create, can_edit, can_delete
             FROM sys_user_rights WHERE user_id = ? ORDER BY route",
            [user_id.into()],
        ))
        .await?;

    rows.iter().map(row_from_query).collect()
}

/// Replace every stored row of the user in one transaction
pub async fn replace_for_user(user_id: &str, rows: &[UserRightRow]) -> Result<()> {
    let txn = get_connection().begin().await?;

    txn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "DELETE FROM sys_user_rights WHERE user_id = ?",
        [user_id.into()],
    ))
    .await
    .context("Failed to clear user rights")?;

    for row in rows.iter().filter(|r| !r.rights.is_empty()) {
        let value = |f: Option<RightFlag>| f.map(|f| f.as_str().to_string());
        txn.execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "INSERT INTO sys_user_rights (user_id, route, can_view, can_create, can_edit, can_delete)
             VALUES (?, ?, ?, ?, ?, ?)",
            [
                user_id.into(),
                row.route.clone().into(),
                value(row.rights.can_view).into(),
                value(row.rights.can_create).into(),
                value(row.rights.can_edit).into(),
                value(row.rights.can_delete).into(),
            ],
        ))
        .await
        .with_context(|| format!("Failed to store rights for {}", row.route))?;
    }

    txn.commit().await?;
    Ok(())
}

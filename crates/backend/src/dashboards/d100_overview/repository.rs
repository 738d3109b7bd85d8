use anyhow::Result;
use sea_orm::{FromQueryResult, Statement};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::shared::data::db::get_connection;

/// Raw aggregation result from SQL query
#[derive(Debug, Clone, Serialize, Deserialize, FromQueryResult)]
pub struct CollectionCount {
    pub collection: String,
    pub total: i64,
}

#[derive(Debug, FromQueryResult)]
struct Total {
    total: i64,
}

/// Live record count of every collection
pub async fn count_by_collection() -> Result<HashMap<String, u64>> {
    let sql = r#"
        SELECT collection, COUNT(*) AS total
        FROM records
        WHERE is_deleted = 0
        GROUP BY collection
    "#;
    let stmt = Statement::from_string(sea_orm::DatabaseBackend::Sqlite, sql.to_string());
    let rows = CollectionCount::find_by_statement(stmt)
        .all(get_connection())
        .await?;

    Ok(rows
        .into_iter()
        .map(|r| (r.collection, r.total.max(0) as u64))
        .collect())
}

/// Live records of a collection whose JSON `status` equals `status`
pub async fn count_with_status(collection: &str, status: &str) -> Result<u64> {
    let sql = r#"
        SELECT COUNT(*) AS total
        FROM records
        WHERE collection = ? AND is_deleted = 0
          AND json_extract(data, '$.status') = ?
    "#;
    let stmt = Statement::from_sql_and_values(
        sea_orm::DatabaseBackend::Sqlite,
        sql,
        [collection.into(), status.into()],
    );
    let row = Total::find_by_statement(stmt).one(get_connection()).await?;
    Ok(row.map(|r| r.total.max(0) as u64).unwrap_or(0))
}

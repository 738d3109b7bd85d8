use anyhow::{Context, Result};
use chrono::Utc;
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement, TransactionTrait};

use crate::shared::data::db::get_connection;

pub async fn product_ids(api_user_id: &str) -> Result<Vec<String>> {
    let rows = get_connection()
        .query_all(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT product_id FROM api_user_products WHERE api_user_id = ? ORDER BY product_id",
            [api_user_id.into()],
        ))
        .await?;

    rows.iter()
        .map(|row| row.try_get::<String>("", "product_id").map_err(anyhow::Error::from))
        .collect()
}

/// Replace the whole assignment set of the user
pub async fn replace(api_user_id: &str, product_ids: &[String]) -> Result<()> {
    let txn = get_connection().begin().await?;
    let now = Utc::now().to_rfc3339();

    txn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "DELETE FROM api_user_products WHERE api_user_id = ?",
        [api_user_id.into()],
    ))
    .await
    .context("Failed to clear product assignments")?;

    for product_id in product_ids {
        txn.execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "INSERT INTO api_user_products (api_user_id, product_id, assigned_at) VALUES (?, ?, ?)",
            [
                api_user_id.into(),
                product_id.clone().into(),
                now.clone().into(),
            ],
        ))
        .await
        .with_context(|| format!("Failed to assign product {}", product_id))?;
    }

    txn.commit().await?;
    Ok(())
}

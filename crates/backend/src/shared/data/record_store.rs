//! Document table holding every back-office collection.
//!
//! Each row keeps the aggregate's fields as JSON in `data`, next to the
//! columns the store itself needs (collection, lifecycle metadata).
//! Unique values live in `record_keys` under a UNIQUE constraint and are
//! written in the same transaction as the record.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use contracts::domain::common::{AggregateRoot, EntityMetadata, Record};
use once_cell::sync::Lazy;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseBackend, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, SqlErr, Statement, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::db::get_connection;

/// Record writes that touch unique keys run one at a time in this process
static KEY_WRITES: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

/// A unique value already held by another record of the collection
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field} '{value}' is already in use")]
pub struct KeyTaken {
    pub field: &'static str,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "records")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub collection: String,
    pub data: String,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub version: i32,
    pub is_deleted: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_record<A: AggregateRoot>(self) -> Result<Record<A>> {
        let data: A = serde_json::from_str(&self.data)
            .with_context(|| format!("Corrupt {} record {}", self.collection, self.id))?;
        Ok(Record {
            id: self.id,
            data,
            metadata: EntityMetadata {
                created_by: self.created_by,
                created_at: self.created_at,
                updated_at: self.updated_at,
                version: self.version,
            },
        })
    }
}

fn to_active<A: AggregateRoot>(record: &Record<A>) -> Result<ActiveModel> {
    Ok(ActiveModel {
        id: Set(record.id.clone()),
        collection: Set(A::collection_name().to_string()),
        data: Set(serde_json::to_string(&record.data)?),
        created_by: Set(record.metadata.created_by.clone()),
        created_at: Set(record.metadata.created_at),
        updated_at: Set(record.metadata.updated_at),
        version: Set(record.metadata.version),
        is_deleted: Set(false),
    })
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

/// All live records of the collection, oldest first
pub async fn list<A: AggregateRoot>() -> Result<Vec<Record<A>>> {
    Entity::find()
        .filter(Column::Collection.eq(A::collection_name()))
        .filter(Column::IsDeleted.eq(false))
        .order_by_asc(Column::CreatedAt)
        .all(conn())
        .await?
        .into_iter()
        .map(Model::into_record)
        .collect()
}

pub async fn get<A: AggregateRoot>(id: &str) -> Result<Option<Record<A>>> {
    let model = Entity::find_by_id(id.to_string())
        .filter(Column::Collection.eq(A::collection_name()))
        .filter(Column::IsDeleted.eq(false))
        .one(conn())
        .await?;
    model.map(Model::into_record).transpose()
}

/// Replace the unique keys of a record; fails with `KeyTaken` on a clash
async fn write_keys<C, A>(db: &C, record: &Record<A>) -> Result<()>
where
    C: ConnectionTrait,
    A: AggregateRoot,
{
    db.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "DELETE FROM record_keys WHERE record_id = ?",
        [record.id.clone().into()],
    ))
    .await?;

    for (field, value) in record.data.unique_keys() {
        if value.is_empty() {
            continue;
        }
        let inserted = db
            .execute(Statement::from_sql_and_values(
                DatabaseBackend::Sqlite,
                "INSERT INTO record_keys (collection, field, value, record_id) VALUES (?, ?, ?, ?)",
                [
                    A::collection_name().into(),
                    field.into(),
                    value.clone().into(),
                    record.id.clone().into(),
                ],
            ))
            .await;
        if let Err(err) = inserted {
            let clash = matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
                || err.to_string().contains("UNIQUE constraint failed");
            if clash {
                return Err(KeyTaken { field, value }.into());
            }
            return Err(err.into());
        }
    }
    Ok(())
}

pub async fn insert_on<A: AggregateRoot>(db: &DatabaseConnection, record: &Record<A>) -> Result<()> {
    let _guard = KEY_WRITES.lock().await;
    let txn = db.begin().await?;
    to_active(record)?.insert(&txn).await?;
    write_keys(&txn, record).await?;
    txn.commit().await?;
    Ok(())
}

pub async fn insert<A: AggregateRoot>(record: &Record<A>) -> Result<()> {
    insert_on(conn(), record).await
}

pub async fn update<A: AggregateRoot>(record: &Record<A>) -> Result<()> {
    let _guard = KEY_WRITES.lock().await;
    let txn = conn().begin().await?;
    to_active(record)?.update(&txn).await?;
    write_keys(&txn, record).await?;
    txn.commit().await?;
    Ok(())
}

/// Store `record` only if the stored version is still `expected_version`;
/// returns false when another write got there first
pub async fn update_if_version_on<A: AggregateRoot>(
    db: &DatabaseConnection,
    record: &Record<A>,
    expected_version: i32,
) -> Result<bool> {
    let result = Entity::update_many()
        .col_expr(Column::Data, Expr::value(serde_json::to_string(&record.data)?))
        .col_expr(Column::UpdatedAt, Expr::value(record.metadata.updated_at))
        .col_expr(Column::Version, Expr::value(record.metadata.version))
        .filter(Column::Id.eq(record.id.as_str()))
        .filter(Column::Collection.eq(A::collection_name()))
        .filter(Column::IsDeleted.eq(false))
        .filter(Column::Version.eq(expected_version))
        .exec(db)
        .await?;
    Ok(result.rows_affected > 0)
}

pub async fn update_if_version<A: AggregateRoot>(
    record: &Record<A>,
    expected_version: i32,
) -> Result<bool> {
    update_if_version_on(conn(), record, expected_version).await
}

/// Soft delete; returns false when nothing matched. Frees the record's keys.
pub async fn delete(collection: &str, id: &str) -> Result<bool> {
    let _guard = KEY_WRITES.lock().await;
    let txn = conn().begin().await?;
    let result = Entity::update_many()
        .col_expr(Column::IsDeleted, Expr::value(true))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::Id.eq(id))
        .filter(Column::Collection.eq(collection))
        .filter(Column::IsDeleted.eq(false))
        .exec(&txn)
        .await?;
    txn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "DELETE FROM record_keys WHERE record_id = ?",
        [id.into()],
    ))
    .await
    .context("Failed to release record keys")?;
    txn.commit().await?;
    Ok(result.rows_affected > 0)
}

/// Whether `collection` holds a live record with this id
pub async fn exists(collection: &str, id: &str) -> Result<bool> {
    let count = Entity::find()
        .filter(Column::Id.eq(id))
        .filter(Column::Collection.eq(collection))
        .filter(Column::IsDeleted.eq(false))
        .count(conn())
        .await?;
    Ok(count > 0)
}

pub async fn count(collection: &str) -> Result<u64> {
    let count = Entity::find()
        .filter(Column::Collection.eq(collection))
        .filter(Column::IsDeleted.eq(false))
        .count(conn())
        .await?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a004_courier::Courier;
    use contracts::domain::a005_product::{Product, ProductCategory};
    use sea_orm::Database;

    use crate::shared::data::db::sqlite_url;
    use crate::system::initialization::apply_schema_on;

    async fn scratch_db() -> DatabaseConnection {
        let file = std::env::temp_dir()
            .join("brokerage-tests")
            .join(format!("{}.db", uuid::Uuid::new_v4()));
        let db = Database::connect(&sqlite_url(&file).unwrap()).await.unwrap();
        apply_schema_on(&db).await.unwrap();
        db
    }

    fn courier(code: &str) -> Courier {
        Courier {
            name: format!("{} Express", code),
            code: code.into(),
            tracking_url: None,
            is_active: true,
        }
    }

    async fn stored_couriers(db: &DatabaseConnection) -> u64 {
        Entity::find()
            .filter(Column::Collection.eq(Courier::collection_name()))
            .count(db)
            .await
            .unwrap()
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_keep_codes_unique() {
        let db = scratch_db().await;
        let tasks: Vec<_> = (0..8)
            .map(|i| {
                let db = db.clone();
                tokio::spawn(async move {
                    let record = Record::new(format!("c-{}", i), courier("tcs"), None);
                    insert_on(&db, &record).await
                })
            })
            .collect();

        let mut saved = 0;
        for task in tasks {
            match task.await.unwrap() {
                Ok(()) => saved += 1,
                Err(err) => {
                    let taken = err.downcast_ref::<KeyTaken>().expect("only key clashes");
                    assert_eq!(taken.field, "code");
                    assert_eq!(taken.value, "TCS");
                }
            }
        }
        assert_eq!(saved, 1);
        assert_eq!(stored_couriers(&db).await, 1);
    }

    #[tokio::test]
    async fn test_stale_version_is_not_written() {
        let db = scratch_db().await;
        let mut record = Record::new("c-1", courier("LEO"), None);
        insert_on(&db, &record).await.unwrap();

        let stale = record.metadata.version;
        record.data.is_active = false;
        record.metadata.touch();
        assert!(update_if_version_on(&db, &record, stale).await.unwrap());

        record.data.is_active = true;
        record.metadata.touch();
        assert!(!update_if_version_on(&db, &record, stale).await.unwrap());
    }

    #[test]
    fn test_model_into_record() {
        let now = Utc::now();
        let model = Model {
            id: "p-1".into(),
            collection: "products".into(),
            data: r#"{"name":"Car Shield","code":"MTR1","category":"motor","is_active":true}"#
                .into(),
            created_by: Some("admin".into()),
            created_at: now,
            updated_at: now,
            version: 2,
            is_deleted: false,
        };
        let record: Record<Product> = model.into_record().unwrap();
        assert_eq!(record.id, "p-1");
        assert_eq!(record.data.category, ProductCategory::Motor);
        assert_eq!(record.metadata.version, 2);
    }

    #[test]
    fn test_corrupt_data_is_an_error() {
        let now = Utc::now();
        let model = Model {
            id: "p-2".into(),
            collection: "products".into(),
            data: "{".into(),
            created_by: None,
            created_at: now,
            updated_at: now,
            version: 0,
            is_deleted: false,
        };
        assert!(model.into_record::<Product>().is_err());
    }
}

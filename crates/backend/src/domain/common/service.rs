//! Generic create/read/update/delete for every record collection.

use contracts::domain::common::{AggregateRoot, Record};
use contracts::shared::api::LookupItem;

use crate::shared::data::record_store;
use crate::shared::error::{AppError, AppResult};
use crate::shared::format::humanize_field;

/// Every referenced record must exist
async fn check_references<A: AggregateRoot>(aggregate: &A) -> AppResult<()> {
    for reference in aggregate.references() {
        if !record_store::exists(reference.collection, &reference.id).await? {
            return Err(AppError::Validation(format!(
                "Selected {} does not exist",
                reference.label.to_lowercase()
            )));
        }
    }
    Ok(())
}

/// Find the first unique key already used by another record
pub fn find_duplicate<A: AggregateRoot>(
    aggregate: &A,
    existing: &[Record<A>],
    own_id: Option<&str>,
) -> Option<(&'static str, String)> {
    let keys = aggregate.unique_keys();
    for record in existing.iter().filter(|r| Some(r.id.as_str()) != own_id) {
        let other = record.data.unique_keys();
        for (field, value) in &keys {
            if value.is_empty() {
                continue;
            }
            if other.iter().any(|(f, v)| f == field && v == value) {
                return Some((*field, value.clone()));
            }
        }
    }
    None
}

fn key_conflict(field: &str, value: &str) -> AppError {
    AppError::Conflict(format!(
        "{} '{}' is already in use",
        humanize_field(field),
        value
    ))
}

/// A store error; a key clash found by the database becomes a conflict
pub fn store_error(err: anyhow::Error) -> AppError {
    match err.downcast::<record_store::KeyTaken>() {
        Ok(taken) => key_conflict(taken.field, &taken.value),
        Err(err) => AppError::Internal(err),
    }
}

/// Early, friendly check; the key table settles concurrent writes
async fn check_unique<A: AggregateRoot>(aggregate: &A, own_id: Option<&str>) -> AppResult<()> {
    if aggregate.unique_keys().is_empty() {
        return Ok(());
    }
    let existing = record_store::list::<A>().await?;
    match find_duplicate(aggregate, &existing, own_id) {
        Some((field, value)) => Err(key_conflict(field, &value)),
        None => Ok(()),
    }
}

pub async fn list<A: AggregateRoot>() -> AppResult<Vec<Record<A>>> {
    Ok(record_store::list::<A>().await?)
}

pub async fn get<A: AggregateRoot>(id: &str) -> AppResult<Record<A>> {
    record_store::get::<A>(id)
        .await?
        .ok_or_else(|| AppError::not_found(A::element_name()))
}

pub async fn lookup<A: AggregateRoot>() -> AppResult<Vec<LookupItem>> {
    let records = record_store::list::<A>().await?;
    let mut items: Vec<LookupItem> = records
        .into_iter()
        .map(|r| LookupItem {
            label: r.label(),
            id: r.id,
        })
        .collect();
    items.sort_by_key(|i| i.label.to_lowercase());
    Ok(items)
}

/// Validate and store a new record, stamping the author
pub async fn create<A: AggregateRoot>(aggregate: A, created_by: &str) -> AppResult<Record<A>> {
    aggregate.validate()?;
    check_references(&aggregate).await?;
    check_unique(&aggregate, None).await?;

    let record = Record::new(
        uuid::Uuid::new_v4().to_string(),
        aggregate,
        Some(created_by.to_string()),
    );
    record_store::insert(&record).await.map_err(store_error)?;
    tracing::info!(
        "{} {} created by {}",
        A::element_name(),
        record.id,
        created_by
    );
    Ok(record)
}

pub async fn update<A: AggregateRoot>(id: &str, mut aggregate: A) -> AppResult<Record<A>> {
    let mut record = get::<A>(id).await?;
    aggregate.preserve_on_update(&record.data);
    aggregate.validate()?;
    check_references(&aggregate).await?;
    check_unique(&aggregate, Some(id)).await?;

    record.data = aggregate;
    record.metadata.touch();
    record_store::update(&record).await.map_err(store_error)?;
    Ok(record)
}

/// Store a record whose data was changed by a dedicated operation.
/// Fails with a conflict when the record changed since it was read.
pub async fn save<A: AggregateRoot>(record: &mut Record<A>) -> AppResult<()> {
    let read_version = record.metadata.version;
    record.metadata.touch();
    if !record_store::update_if_version(record, read_version).await? {
        return Err(AppError::Conflict(format!(
            "{} was changed by someone else. Reload and try again.",
            A::element_name()
        )));
    }
    Ok(())
}

pub async fn delete<A: AggregateRoot>(id: &str) -> AppResult<()> {
    if record_store::delete(A::collection_name(), id).await? {
        tracing::info!("{} {} deleted", A::element_name(), id);
        Ok(())
    } else {
        Err(AppError::not_found(A::element_name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a004_courier::Courier;

    fn courier(code: &str) -> Courier {
        Courier {
            name: format!("{} Express", code),
            code: code.into(),
            tracking_url: None,
            is_active: true,
        }
    }

    #[test]
    fn test_find_duplicate_ignores_own_record() {
        let existing = vec![
            Record::new("c-1", courier("TCS"), None),
            Record::new("c-2", courier("LEO"), None),
        ];

        let dup = find_duplicate(&courier("tcs"), &existing, None);
        assert_eq!(dup, Some(("code", "TCS".to_string())));

        assert_eq!(find_duplicate(&courier("TCS"), &existing, Some("c-1")), None);
        assert_eq!(find_duplicate(&courier("MNP"), &existing, None), None);
    }

    #[test]
    fn test_key_clash_is_a_conflict() {
        let taken = record_store::KeyTaken {
            field: "igis_code",
            value: "IG000001".into(),
        };
        let err = store_error(anyhow::Error::from(taken));
        assert_eq!(err.status(), axum::http::StatusCode::CONFLICT);
        assert_eq!(err.client_message(), "IGIS code 'IG000001' is already in use");

        let err = store_error(anyhow::anyhow!("disk full"));
        assert_eq!(err.client_message(), "Internal server error");
    }
}

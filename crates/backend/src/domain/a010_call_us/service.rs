use contracts::domain::a010_call_us::{CallUsRequest, CallUsStatus};
use contracts::domain::common::Record;

use crate::domain::common::service;
use crate::shared::error::AppResult;

/// Requests in one status, or all of them; newest first
pub async fn list_by_status(status: Option<CallUsStatus>) -> AppResult<Vec<Record<CallUsRequest>>> {
    let mut requests: Vec<Record<CallUsRequest>> = service::list::<CallUsRequest>()
        .await?
        .into_iter()
        .filter(|r| status.map_or(true, |s| r.data.status == s))
        .collect();
    requests.sort_by(|a, b| b.metadata.created_at.cmp(&a.metadata.created_at));
    Ok(requests)
}

/// Any status can follow any other; closing and reopening are both allowed
pub async fn change_status(id: &str, status: CallUsStatus) -> AppResult<Record<CallUsRequest>> {
    let mut record = service::get::<CallUsRequest>(id).await?;
    record.data.status = status;
    service::save(&mut record).await?;
    tracing::info!("Call-us request {} is now {}", id, status.code());
    Ok(record)
}

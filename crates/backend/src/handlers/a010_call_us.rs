use axum::{
    extract::{Path, Query},
    Json,
};
use contracts::domain::a010_call_us::{CallUsQuery, CallUsRequest, CallUsStatusChange};
use contracts::domain::common::{AggregateRoot, Record};
use contracts::shared::api::ApiResponse;
use contracts::system::rights::Capability;

use crate::domain::a010_call_us::service;
use crate::shared::error::AppResult;
use crate::system::auth::extractor::CurrentUser;
use crate::system::rights::service::require;

/// GET /api/call-us?status=
pub async fn list_by_status(
    CurrentUser(claims): CurrentUser,
    Query(query): Query<CallUsQuery>,
) -> AppResult<Json<ApiResponse<Vec<Record<CallUsRequest>>>>> {
    require(&claims, CallUsRequest::route(), Capability::View).await?;
    let requests = service::list_by_status(query.status).await?;
    Ok(Json(ApiResponse::new("Call-us requests loaded", requests)))
}

/// POST /api/call-us/:id/status
pub async fn change_status(
    CurrentUser(claims): CurrentUser,
    Path(id): Path<String>,
    Json(body): Json<CallUsStatusChange>,
) -> AppResult<Json<ApiResponse<Record<CallUsRequest>>>> {
    require(&claims, CallUsRequest::route(), Capability::Edit).await?;
    let record = service::change_status(&id, body.status).await?;
    Ok(Json(ApiResponse::new(
        format!("Request marked as {}", body.status.label().to_lowercase()),
        record,
    )))
}

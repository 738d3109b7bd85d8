use axum::{extract::Path, Json};
use contracts::domain::a008_motor_quote::{MotorQuote, QuoteStatusChange};
use contracts::domain::common::{AggregateRoot, Record};
use contracts::shared::api::ApiResponse;
use contracts::system::rights::Capability;

use crate::domain::a008_motor_quote::service;
use crate::shared::error::AppResult;
use crate::system::auth::extractor::CurrentUser;
use crate::system::rights::service::require;

/// POST /api/motor-quotes/:id/status
pub async fn change_status(
    CurrentUser(claims): CurrentUser,
    Path(id): Path<String>,
    Json(body): Json<QuoteStatusChange>,
) -> AppResult<Json<ApiResponse<Record<MotorQuote>>>> {
    require(&claims, MotorQuote::route(), Capability::Edit).await?;
    let record = service::change_status(&id, body.status).await?;
    Ok(Json(ApiResponse::new(
        format!("Quote marked as {}", body.status.label().to_lowercase()),
        record,
    )))
}

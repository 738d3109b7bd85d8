use axum::Json;
use contracts::dashboards::d100_overview::OverviewResponse;
use contracts::shared::api::ApiResponse;
use contracts::system::rights::Capability;
use contracts::system::routes::DASHBOARD;

use crate::dashboards::d100_overview::service;
use crate::shared::error::AppResult;
use crate::system::auth::extractor::CurrentUser;
use crate::system::rights::service::{permission_table, require};

/// GET /api/dashboard/summary
pub async fn get_summary(
    CurrentUser(claims): CurrentUser,
) -> AppResult<Json<ApiResponse<OverviewResponse>>> {
    require(&claims, &DASHBOARD, Capability::View).await?;
    let rights = permission_table(&claims).await?;
    let overview = service::get_overview(&rights).await?;
    Ok(Json(ApiResponse::new("Dashboard loaded", overview)))
}

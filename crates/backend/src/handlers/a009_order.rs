use axum::{extract::Query, Json};
use contracts::domain::a009_order::{Order, OrderFilter};
use contracts::domain::common::{AggregateRoot, Record};
use contracts::shared::api::ApiResponse;
use contracts::system::rights::Capability;

use crate::domain::a009_order::service;
use crate::shared::error::AppResult;
use crate::system::auth::extractor::CurrentUser;
use crate::system::rights::service::require;

/// GET /api/orders?status=&courier_id=&branch_id=&date_from=&date_to=
pub async fn list_filtered(
    CurrentUser(claims): CurrentUser,
    Query(filter): Query<OrderFilter>,
) -> AppResult<Json<ApiResponse<Vec<Record<Order>>>>> {
    require(&claims, Order::route(), Capability::View).await?;
    let orders = service::list_filtered(filter).await?;
    Ok(Json(ApiResponse::new(
        format!("{} orders found", orders.len()),
        orders,
    )))
}

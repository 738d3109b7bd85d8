use axum::{extract::Path, Json};
use contracts::domain::a011_api_user_product::ApiUserProducts;
use contracts::shared::api::ApiResponse;
use contracts::system::rights::Capability;
use contracts::system::routes::API_USER_PRODUCTS;

use crate::domain::a011_api_user_product::service;
use crate::shared::error::AppResult;
use crate::system::auth::extractor::CurrentUser;
use crate::system::rights::service::require;

/// GET /api/api-users/:id/products
pub async fn get_products(
    CurrentUser(claims): CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<ApiUserProducts>>> {
    require(&claims, &API_USER_PRODUCTS, Capability::View).await?;
    let products = service::get(&id).await?;
    Ok(Json(ApiResponse::new("Product assignments loaded", products)))
}

/// POST /api/api-users/:id/products
///
/// Idempotent upsert: the body replaces the whole assignment set.
pub async fn assign_products(
    CurrentUser(claims): CurrentUser,
    Path(id): Path<String>,
    Json(dto): Json<ApiUserProducts>,
) -> AppResult<Json<ApiResponse<ApiUserProducts>>> {
    require(&claims, &API_USER_PRODUCTS, Capability::Edit).await?;
    let products = service::assign(&id, dto).await?;
    Ok(Json(ApiResponse::new(
        "Product assignments saved successfully",
        products,
    )))
}

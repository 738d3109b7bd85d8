use axum::extract::{Json, Path};
use contracts::shared::api::ApiResponse;
use contracts::system::rights::{PermissionTable, UserRightsDto};

use crate::shared::error::{AppError, AppResult};
use crate::system::auth::extractor::CurrentUser;
use crate::system::rights::service;
use crate::system::users::service as user_service;

/// GET /api/system/rights: permission table of the signed-in user
pub async fn my_rights(
    CurrentUser(claims): CurrentUser,
) -> AppResult<Json<ApiResponse<PermissionTable>>> {
    let table = service::permission_table(&claims).await?;
    Ok(Json(ApiResponse::new("Rights loaded", table)))
}

/// GET /api/system/users/:id/rights (admin only)
pub async fn get_user_rights(
    CurrentUser(_claims): CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<UserRightsDto>>> {
    if user_service::get_by_id(&id).await?.is_none() {
        return Err(AppError::not_found("User"));
    }
    let rows = service::rows_for_user(&id).await?;
    Ok(Json(ApiResponse::new(
        "Rights loaded",
        UserRightsDto { user_id: id, rows },
    )))
}

/// PUT /api/system/users/:id/rights (admin only)
pub async fn save_user_rights(
    CurrentUser(claims): CurrentUser,
    Path(id): Path<String>,
    Json(dto): Json<UserRightsDto>,
) -> AppResult<Json<ApiResponse<UserRightsDto>>> {
    if user_service::get_by_id(&id).await?.is_none() {
        return Err(AppError::not_found("User"));
    }
    service::save_rows(&id, dto.rows).await?;
    tracing::info!("Rights of user {} updated by {}", id, claims.username);

    let rows = service::rows_for_user(&id).await?;
    Ok(Json(ApiResponse::new(
        "Rights saved successfully",
        UserRightsDto { user_id: id, rows },
    )))
}

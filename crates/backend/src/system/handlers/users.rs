use axum::extract::{Json, Path};
use contracts::shared::api::{ApiResponse, CreatedId, LookupItem};
use contracts::system::users::{CreateUserDto, UpdateUserDto, User};

use crate::shared::error::{AppError, AppResult};
use crate::system::auth::extractor::CurrentUser;
use crate::system::users::service;

/// List all users (admin only)
pub async fn list(CurrentUser(_claims): CurrentUser) -> AppResult<Json<ApiResponse<Vec<User>>>> {
    let users = service::list_all().await?;
    Ok(Json(ApiResponse::new("Users loaded", users)))
}

/// Active users as select options (any signed-in user)
pub async fn lookup(
    CurrentUser(_claims): CurrentUser,
) -> AppResult<Json<ApiResponse<Vec<LookupItem>>>> {
    let items = service::lookup().await?;
    Ok(Json(ApiResponse::new("Users loaded", items)))
}

/// Get user by ID (admin only)
pub async fn get_by_id(
    CurrentUser(_claims): CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<User>>> {
    let user = service::get_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("User"))?;
    Ok(Json(ApiResponse::new("User loaded", user)))
}

/// Create user (admin only)
pub async fn create(
    CurrentUser(claims): CurrentUser,
    Json(dto): Json<CreateUserDto>,
) -> AppResult<Json<ApiResponse<CreatedId>>> {
    let id = service::create(dto, Some(claims.username)).await?;
    Ok(Json(ApiResponse::new(
        "User created successfully",
        CreatedId { id },
    )))
}

/// Update user (admin only)
pub async fn update(
    CurrentUser(_claims): CurrentUser,
    Path(id): Path<String>,
    Json(dto): Json<UpdateUserDto>,
) -> AppResult<Json<ApiResponse<CreatedId>>> {
    service::update(&id, dto).await?;
    Ok(Json(ApiResponse::new(
        "User updated successfully",
        CreatedId { id },
    )))
}

/// Delete user (admin only)
pub async fn delete(
    CurrentUser(claims): CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<CreatedId>>> {
    service::delete(&id, &claims.sub).await?;
    Ok(Json(ApiResponse::new(
        "User deleted successfully",
        CreatedId { id },
    )))
}

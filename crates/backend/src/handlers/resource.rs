//! Handlers shared by every record collection, instantiated per aggregate
//! in `routes.rs` (e.g. `resource::list::<Branch>`).

use axum::{extract::Path, Json};
use contracts::domain::common::{AggregateRoot, Record};
use contracts::shared::api::{ApiResponse, CreatedId, LookupItem};
use contracts::system::rights::Capability;

use crate::domain::common::service;
use crate::shared::error::AppResult;
use crate::system::auth::extractor::CurrentUser;
use crate::system::rights::service::require;

/// GET /api/{collection}
pub async fn list<A: AggregateRoot>(
    CurrentUser(claims): CurrentUser,
) -> AppResult<Json<ApiResponse<Vec<Record<A>>>>> {
    require(&claims, A::route(), Capability::View).await?;
    let records = service::list::<A>().await?;
    Ok(Json(ApiResponse::new(
        format!("{} loaded", A::list_name()),
        records,
    )))
}

/// GET /api/{collection}/lookup
///
/// Reference lists feed select fields on other modules' forms, so any
/// signed-in user may read them.
pub async fn lookup<A: AggregateRoot>(
    CurrentUser(_claims): CurrentUser,
) -> AppResult<Json<ApiResponse<Vec<LookupItem>>>> {
    let items = service::lookup::<A>().await?;
    Ok(Json(ApiResponse::new(
        format!("{} loaded", A::list_name()),
        items,
    )))
}

/// GET /api/{collection}/:id
pub async fn get_by_id<A: AggregateRoot>(
    CurrentUser(claims): CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Record<A>>>> {
    // The edit screen is the only reader of a single record
    require(&claims, A::route(), Capability::Edit).await?;
    let record = service::get::<A>(&id).await?;
    Ok(Json(ApiResponse::new(
        format!("{} loaded", A::element_name()),
        record,
    )))
}

/// POST /api/{collection}
pub async fn create<A: AggregateRoot>(
    CurrentUser(claims): CurrentUser,
    Json(dto): Json<A>,
) -> AppResult<Json<ApiResponse<CreatedId>>> {
    require(&claims, A::route(), Capability::Create).await?;
    let record = service::create(dto, &claims.username).await?;
    Ok(Json(ApiResponse::new(
        format!("{} created successfully", A::element_name()),
        CreatedId { id: record.id },
    )))
}

/// PUT /api/{collection}/:id
pub async fn update<A: AggregateRoot>(
    CurrentUser(claims): CurrentUser,
    Path(id): Path<String>,
    Json(dto): Json<A>,
) -> AppResult<Json<ApiResponse<Record<A>>>> {
    require(&claims, A::route(), Capability::Edit).await?;
    let record = service::update(&id, dto).await?;
    Ok(Json(ApiResponse::new(
        format!("{} updated successfully", A::element_name()),
        record,
    )))
}

/// DELETE /api/{collection}/:id
pub async fn delete<A: AggregateRoot>(
    CurrentUser(claims): CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<CreatedId>>> {
    require(&claims, A::route(), Capability::Delete).await?;
    service::delete::<A>(&id).await?;
    Ok(Json(ApiResponse::new(
        format!("{} deleted successfully", A::element_name()),
        CreatedId { id },
    )))
}

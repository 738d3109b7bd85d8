use contracts::domain::a005_product::Product;
use contracts::domain::a011_api_user_product::ApiUserProducts;
use contracts::domain::common::AggregateRoot;

use super::repository;
use crate::shared::data::record_store;
use crate::shared::error::{AppError, AppResult};
use crate::system::users::repository as users;

pub async fn get(api_user_id: &str) -> AppResult<ApiUserProducts> {
    if users::get_by_id(api_user_id).await?.is_none() {
        return Err(AppError::not_found("API user"));
    }
    Ok(ApiUserProducts {
        api_user_id: api_user_id.to_string(),
        product_ids: repository::product_ids(api_user_id).await?,
    })
}

/// Upsert: the posted set replaces whatever was assigned before
pub async fn assign(api_user_id: &str, dto: ApiUserProducts) -> AppResult<ApiUserProducts> {
    let dto = ApiUserProducts {
        api_user_id: api_user_id.to_string(),
        ..dto
    }
    .normalized();
    dto.validate()?;

    if users::get_by_id(api_user_id).await?.is_none() {
        return Err(AppError::not_found("API user"));
    }
    for product_id in &dto.product_ids {
        if !record_store::exists(Product::collection_name(), product_id).await? {
            return Err(AppError::Validation(format!(
                "Product {} does not exist",
                product_id
            )));
        }
    }

    repository::replace(api_user_id, &dto.product_ids).await?;
    tracing::info!(
        "API user {} now has {} products",
        api_user_id,
        dto.product_ids.len()
    );
    Ok(dto)
}

use axum::extract::Json;
use contracts::shared::api::ApiResponse;
use contracts::system::auth::{
    LoginRequest, LoginResponse, RefreshRequest, RefreshResponse, UserInfo,
};
use contracts::system::users::User;

use crate::shared::error::{AppError, AppResult};
use crate::system::auth::extractor::CurrentUser;
use crate::system::{auth::jwt, rights::service as rights_service, users::service as user_service};

fn user_info(user: User) -> UserInfo {
    UserInfo {
        id: user.id,
        username: user.username,
        full_name: user.full_name,
        email: user.email,
        is_admin: user.is_admin,
    }
}

/// Login handler
pub async fn login(
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let user = user_service::verify_credentials(&request.username, &request.password)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid username or password".into()))?;

    let access_token = jwt::generate_access_token(&user.id, &user.username, user.is_admin).await?;
    let claims = jwt::validate_token(&access_token).await?;
    let rights = rights_service::permission_table(&claims).await?;

    let refresh_token = jwt::generate_refresh_token();
    store_refresh_token(&user.id, &refresh_token).await?;

    tracing::info!("User {} signed in", user.username);

    let response = LoginResponse {
        access_token,
        refresh_token,
        user: user_info(user),
        rights,
    };

    Ok(Json(ApiResponse::new("Signed in successfully", response)))
}

/// Refresh token handler
pub async fn refresh(
    Json(request): Json<RefreshRequest>,
) -> AppResult<Json<ApiResponse<RefreshResponse>>> {
    let user_id = validate_refresh_token(&request.refresh_token)
        .await
        .map_err(|_| AppError::Unauthorized("Session expired, please sign in again".into()))?;

    let user = user_service::get_by_id(&user_id)
        .await?
        .filter(|u| u.is_active)
        .ok_or_else(AppError::unauthorized)?;

    let access_token = jwt::generate_access_token(&user.id, &user.username, user.is_admin).await?;

    Ok(Json(ApiResponse::new(
        "Session refreshed",
        RefreshResponse { access_token },
    )))
}

/// Logout handler
pub async fn logout(Json(request): Json<RefreshRequest>) -> AppResult<Json<ApiResponse<()>>> {
    revoke_refresh_token(&request.refresh_token).await?;
    Ok(Json(ApiResponse::new("Signed out", ())))
}

/// Get current user handler (protected by middleware)
pub async fn current_user(
    CurrentUser(claims): CurrentUser,
) -> AppResult<Json<ApiResponse<UserInfo>>> {
    let user = user_service::get_by_id(&claims.sub)
        .await?
        .ok_or_else(|| AppError::not_found("User"))?;

    Ok(Json(ApiResponse::new("Current user", user_info(user))))
}

// Helper functions for refresh tokens

async fn store_refresh_token(user_id: &str, token: &str) -> anyhow::Result<()> {
    use crate::shared::data::db::get_connection;
    use chrono::Utc;
    use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

    let token_id = uuid::Uuid::new_v4().to_string();
    let token_hash = hash_token(token);
    let expires_at = jwt::calculate_refresh_token_expiration();
    let created_at = Utc::now().to_rfc3339();

    get_connection()
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "INSERT INTO sys_refresh_tokens (id, user_id, token_hash, expires_at, created_at)
             VALUES (?, ?, ?, ?, ?)",
            [
                token_id.into(),
                user_id.to_string().into(),
                token_hash.into(),
                expires_at.into(),
                created_at.into(),
            ],
        ))
        .await?;

    Ok(())
}

async fn validate_refresh_token(token: &str) -> anyhow::Result<String> {
    use crate::shared::data::db::get_connection;
    use chrono::Utc;
    use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

    let token_hash = hash_token(token);
    let now = Utc::now().to_rfc3339();

    let result = get_connection()
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT user_id FROM sys_refresh_tokens
             WHERE token_hash = ? AND expires_at > ? AND revoked_at IS NULL",
            [token_hash.into(), now.into()],
        ))
        .await?;

    match result {
        Some(row) => Ok(row.try_get("", "user_id")?),
        None => Err(anyhow::anyhow!("Invalid or expired refresh token")),
    }
}

async fn revoke_refresh_token(token: &str) -> anyhow::Result<()> {
    use crate::shared::data::db::get_connection;
    use chrono::Utc;
    use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

    let token_hash = hash_token(token);
    let revoked_at = Utc::now().to_rfc3339();

    get_connection()
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "UPDATE sys_refresh_tokens SET revoked_at = ? WHERE token_hash = ?",
            [revoked_at.into(), token_hash.into()],
        ))
        .await?;

    Ok(())
}

/// Refresh tokens are stored as SHA-256 hex digests
fn hash_token(token: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_token_is_stable_hex() {
        let first = hash_token("refresh-1");
        assert_eq!(first, hash_token("refresh-1"));
        assert_ne!(first, hash_token("refresh-2"));
        assert_eq!(first.len(), 64);
    }
}

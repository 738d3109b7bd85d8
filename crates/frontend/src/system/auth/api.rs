use contracts::system::auth::{
    LoginRequest, LoginResponse, RefreshRequest, RefreshResponse, UserInfo,
};
use contracts::system::rights::PermissionTable;

use crate::shared::request::{self, ApiError};

pub async fn login(username: String, password: String) -> Result<LoginResponse, ApiError> {
    let body = LoginRequest { username, password };
    request::post("/api/system/auth/login", &body)
        .await
        .map(|r| r.payload)
}

pub async fn refresh_token(refresh_token: String) -> Result<RefreshResponse, ApiError> {
    let body = RefreshRequest { refresh_token };
    request::post("/api/system/auth/refresh", &body)
        .await
        .map(|r| r.payload)
}

/// Revoke the refresh token
pub async fn logout(refresh_token: String) -> Result<(), ApiError> {
    let body = RefreshRequest { refresh_token };
    request::post::<serde_json::Value, _>("/api/system/auth/logout", &body)
        .await
        .map(|_| ())
}

pub async fn get_current_user() -> Result<UserInfo, ApiError> {
    request::get("/api/system/auth/me").await.map(|r| r.payload)
}

/// Permission table of the signed-in user
pub async fn get_rights() -> Result<PermissionTable, ApiError> {
    request::get("/api/system/rights").await.map(|r| r.payload)
}

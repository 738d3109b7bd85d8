use axum::{body::Body, extract::Request, middleware::Next, response::Response};
use contracts::system::auth::TokenClaims;

use crate::shared::error::AppError;

fn bearer_token(req: &Request<Body>) -> Result<String, AppError> {
    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::to_string)
        .ok_or_else(AppError::unauthorized)
}

async fn authenticate(token: String) -> Result<TokenClaims, AppError> {
    super::jwt::validate_token(&token)
        .await
        .map_err(|_| AppError::Unauthorized("Session expired, please sign in again".into()))
}

/// Middleware that requires valid JWT authentication
pub async fn require_auth(mut req: Request<Body>, next: Next) -> Result<Response, AppError> {
    let claims = authenticate(bearer_token(&req)?).await?;

    // Add claims to request extensions for use in handlers
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// Middleware that requires admin privileges
pub async fn require_admin(mut req: Request<Body>, next: Next) -> Result<Response, AppError> {
    let claims = authenticate(bearer_token(&req)?).await?;

    if !claims.is_admin {
        return Err(AppError::forbidden());
    }

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

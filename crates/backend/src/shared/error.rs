use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use contracts::shared::api::ErrorBody;
use contracts::shared::metadata::ValidationErrors;
use thiserror::Error;

/// Errors returned by handlers; every variant renders as `{ "message": ... }`
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn not_found(what: &str) -> Self {
        AppError::NotFound(format!("{} not found", what))
    }

    pub fn unauthorized() -> Self {
        AppError::Unauthorized("Authentication required".to_string())
    }

    pub fn forbidden() -> Self {
        AppError::Forbidden("You do not have permission to perform this action".to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message sent to the client. Internal details stay in the log.
    pub fn client_message(&self) -> String {
        match self {
            AppError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        AppError::Internal(err.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Internal(ref e) = self {
            tracing::error!("Internal error: {:#}", e);
        }
        let body = ErrorBody {
            message: Some(self.client_message()),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::Validation("Name is required".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::Conflict("dup".into()).status(), StatusCode::CONFLICT);
        assert_eq!(AppError::not_found("Branch").status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::forbidden().status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_internal_message_is_hidden() {
        let err = AppError::from(anyhow::anyhow!("disk I/O error"));
        assert_eq!(err.client_message(), "Internal server error");
        assert_eq!(AppError::not_found("Agent").client_message(), "Agent not found");
    }

    #[test]
    fn test_validation_errors_use_first_message() {
        let mut errors = ValidationErrors::new();
        errors.add("name", "Name is required");
        errors.add("city", "City is required");
        let err: AppError = errors.into();
        assert_eq!(err.client_message(), "Name is required");
    }

    #[tokio::test]
    async fn test_response_body_has_message() {
        let response = AppError::Conflict("Code 'TCS' is already in use".into()).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.message.as_deref(), Some("Code 'TCS' is already in use"));
    }
}

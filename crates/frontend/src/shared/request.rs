//! The single transport used by every loader and mutator.
//!
//! Successful responses carry `{ message, payload }`; failures carry
//! `{ message }` and a non-2xx status. No timeout, retry or backoff:
//! a failure ends the interaction that caused it.

use contracts::shared::api::{ApiResponse, ErrorBody};
use gloo_net::http::{Request, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::shared::api_utils::api_url;
use crate::system::auth::storage;

/// Shown when the server gave no usable message
pub const GENERIC_ERROR: &str = "Something went wrong. Please try again.";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP {status}")]
    Http {
        status: u16,
        message: Option<String>,
    },
    #[error("invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Server message when there is one, the generic fallback otherwise
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Http {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            _ => GENERIC_ERROR.to_string(),
        }
    }

    /// Build the error of a non-2xx response from its raw body
    pub fn from_body(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message);
        ApiError::Http { status, message }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

fn builder(method: Method, url: &str) -> RequestBuilder {
    let builder = match method {
        Method::Get => Request::get(url),
        Method::Post => Request::post(url),
        Method::Put => Request::put(url),
        Method::Delete => Request::delete(url),
    };
    match storage::get_access_token() {
        Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
        None => builder,
    }
}

/// Send one request and decode the envelope
pub async fn request<T, B>(
    method: Method,
    path: &str,
    body: Option<&B>,
) -> Result<ApiResponse<T>, ApiError>
where
    T: DeserializeOwned,
    B: Serialize + ?Sized,
{
    let builder = builder(method, &api_url(path));
    let response = match body {
        Some(body) => builder
            .json(body)
            .map_err(|e| ApiError::Decode(e.to_string()))?
            .send()
            .await,
        None => builder.send().await,
    }
    .map_err(|e| ApiError::Network(e.to_string()))?;

    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !response.ok() {
        log::warn!("{:?} {} failed with {}", method, path, status);
        return Err(ApiError::from_body(status, &text));
    }

    serde_json::from_str::<ApiResponse<T>>(&text).map_err(|e| ApiError::Decode(e.to_string()))
}

pub async fn get<T: DeserializeOwned>(path: &str) -> Result<ApiResponse<T>, ApiError> {
    request::<T, ()>(Method::Get, path, None).await
}

pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
    path: &str,
    body: &B,
) -> Result<ApiResponse<T>, ApiError> {
    request(Method::Post, path, Some(body)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_wins() {
        let err = ApiError::from_body(409, r#"{"message":"Code 'TCS' is already in use"}"#);
        assert_eq!(
            err,
            ApiError::Http {
                status: 409,
                message: Some("Code 'TCS' is already in use".into()),
            }
        );
        assert_eq!(err.user_message(), "Code 'TCS' is already in use");
    }

    #[test]
    fn test_generic_fallback() {
        assert_eq!(ApiError::from_body(500, "").user_message(), GENERIC_ERROR);
        assert_eq!(
            ApiError::from_body(400, r#"{"message":"  "}"#).user_message(),
            GENERIC_ERROR
        );
        assert_eq!(
            ApiError::Network("offline".into()).user_message(),
            GENERIC_ERROR
        );
        assert_eq!(ApiError::Decode("eof".into()).user_message(), GENERIC_ERROR);
    }
}

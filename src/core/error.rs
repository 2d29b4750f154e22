use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::shared::text::truncate_chars;

/// 500 responses never expose more than this many characters of the
/// underlying failure message.
const MAX_ERROR_MESSAGE_CHARS: usize = 300;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Rate limit exceeded: {message}")]
    RateLimited {
        message: String,
        retry_after_secs: u64,
    },

    #[error("Remote conversion error: {0}")]
    Remote(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Wire shape for every error response: `{"ok": false, "error": "..."}`
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: String,
}

impl ErrorResponse {
    fn new(error: String) -> Self {
        Self { ok: false, error }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, retry_after_secs) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg, None),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            AppError::RateLimited {
                message,
                retry_after_secs,
            } => (
                StatusCode::TOO_MANY_REQUESTS,
                message,
                Some(retry_after_secs),
            ),
            AppError::Remote(msg) => {
                tracing::error!("Remote conversion error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    truncate_chars(&msg, MAX_ERROR_MESSAGE_CHARS),
                    None,
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    truncate_chars(&msg, MAX_ERROR_MESSAGE_CHARS),
                    None,
                )
            }
        };

        let mut response = (status, Json(ErrorResponse::new(message))).into_response();

        if let Some(secs) = retry_after_secs {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(secs));
        }

        response
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limited_sets_retry_after_header() {
        let error = AppError::RateLimited {
            message: "しばらく時間をおいてお試しください。".to_string(),
            retry_after_secs: 42,
        };

        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            response.headers().get(header::RETRY_AFTER),
            Some(&HeaderValue::from(42u64))
        );
    }

    #[tokio::test]
    async fn test_remote_error_message_is_truncated() {
        let long = "x".repeat(1000);
        let response = AppError::Remote(long).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["ok"], false);
        assert_eq!(body["error"].as_str().unwrap().chars().count(), 300);
    }

    #[test]
    fn test_validation_maps_to_bad_request() {
        let response =
            AppError::Validation("変換したい文を入力してください。".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

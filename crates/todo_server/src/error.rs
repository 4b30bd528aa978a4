//! Conversion of core errors into HTTP responses.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use todo_core::error::AppError;

const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred";

/// Status code plus the `{"error", "code"}` body sent to the client.
#[derive(Debug, Clone)]
pub struct ApiErrorResponse {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl ApiErrorResponse {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        let body = json!({ "error": self.message, "code": self.code });
        (self.status, Json(body)).into_response()
    }
}

impl From<AppError> for ApiErrorResponse {
    fn from(error: AppError) -> Self {
        let status = match &error {
            AppError::InvalidTitle | AppError::InvalidStatus | AppError::InvalidBody(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::StorageIo(_) | AppError::CorruptStore(_) | AppError::InvalidConfig(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if error.is_client_error() {
            Self::new(status, error.code(), error.message())
        } else {
            // Storage details stay in the log.
            tracing::error!(%error, "request failed");
            Self::new(status, "internal_error", INTERNAL_ERROR_MESSAGE)
        }
    }
}

impl From<JsonRejection> for ApiErrorResponse {
    fn from(rejection: JsonRejection) -> Self {
        AppError::invalid_body(rejection.body_text()).into()
    }
}

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use keystone_core::error::AppError;

use crate::dto::ErrorResponse;

/// Message returned for every server-side fault; the detail is only logged.
pub const INTERNAL_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Wrapper so we can implement `IntoResponse` for `AppError`.
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self.0 {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            AppError::Conflict(_) => (StatusCode::BAD_REQUEST, "conflict"),
            AppError::InvalidCredentials | AppError::InvalidToken => {
                (StatusCode::UNAUTHORIZED, "unauthorized")
            }
            AppError::Forbidden(_) => (StatusCode::FORBIDDEN, "forbidden"),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };

        let message = if self.0.is_client_error() {
            self.0.to_string()
        } else {
            tracing::error!(error = %self.0, "Request failed");
            INTERNAL_ERROR_MESSAGE.to_string()
        };

        error_response(status, error_type, message)
    }
}

/// Build the JSON error body shared by handlers and middleware.
pub fn error_response(status: StatusCode, error: &str, message: impl Into<String>) -> Response {
    let body = ErrorResponse {
        error: error.to_string(),
        message: message.into(),
    };
    (status, axum::Json(body)).into_response()
}

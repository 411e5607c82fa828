//! Error handling utilities for route handlers

use axum::Json;
use axum::http::StatusCode;
use serde::Serialize;

/// JSON body returned for request-level failures
#[derive(Serialize)]
pub struct ErrorBody {
    pub status: String,
    pub message: String,
}

/// Status code plus structured body; implements `IntoResponse` as a tuple.
pub type ApiError = (StatusCode, Json<ErrorBody>);

pub fn api_error(status: StatusCode, message: &str) -> ApiError {
    (
        status,
        Json(ErrorBody {
            status: "error".to_string(),
            message: message.to_string(),
        }),
    )
}

pub fn bad_request(message: &str) -> ApiError {
    api_error(StatusCode::BAD_REQUEST, message)
}

/// Extension trait for logging errors and converting to a structured response
pub trait LogErr<T> {
    /// Log the error with context and return `context` to the client under
    /// the given status code.
    fn log_err(self, context: &str, status: StatusCode) -> Result<T, ApiError>;
}

impl<T, E: std::fmt::Display> LogErr<T> for Result<T, E> {
    fn log_err(self, context: &str, status: StatusCode) -> Result<T, ApiError> {
        self.map_err(|e| {
            eprintln!("{}: {}", context, e);
            api_error(status, context)
        })
    }
}

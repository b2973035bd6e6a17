//! Application error type mapping to HTTP status codes and `{error}` bodies.
//!
//! Bodies carry a fixed, generic message per operation. The underlying cause
//! was already logged by the service.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use persona_types::api::ErrorBody;
use persona_types::error::InterviewerError;

pub const CREATE_FAILED: &str = "Failed to create interviewer";
pub const DUPLICATE_NAME: &str = "An interviewer with this name already exists";
pub const FETCH_FAILED: &str = "Failed to fetch interviewer";
pub const NOT_FOUND: &str = "Interviewer not found";
pub const UPDATE_FAILED: &str = "Failed to update interviewer";
pub const DELETE_FAILED: &str = "Failed to delete interviewer";
pub const INTERNAL: &str = "Internal server error";

/// Application-level error, tagged with the operation that failed.
#[derive(Debug)]
pub enum AppError {
    Create(InterviewerError),
    Get(InterviewerError),
    Update(InterviewerError),
    Delete(InterviewerError),
    /// Unparsable path or body.
    Malformed(String),
    /// Failure outside any store operation.
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Create(InterviewerError::Duplicate { .. }) => {
                (StatusCode::CONFLICT, DUPLICATE_NAME)
            }
            AppError::Create(_) => (StatusCode::INTERNAL_SERVER_ERROR, CREATE_FAILED),
            AppError::Get(InterviewerError::NotFound) => (StatusCode::NOT_FOUND, NOT_FOUND),
            AppError::Get(_) => (StatusCode::INTERNAL_SERVER_ERROR, FETCH_FAILED),
            AppError::Update(cause) => {
                tracing::debug!(error = %cause, "update rejected");
                (StatusCode::INTERNAL_SERVER_ERROR, UPDATE_FAILED)
            }
            AppError::Delete(cause) => {
                tracing::debug!(error = %cause, "delete rejected");
                (StatusCode::INTERNAL_SERVER_ERROR, DELETE_FAILED)
            }
            AppError::Malformed(detail) => {
                tracing::warn!(detail = %detail, "rejected malformed request");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL)
            }
            AppError::Internal(detail) => {
                tracing::error!(detail = %detail, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL)
            }
        };

        (status, Json(ErrorBody::new(message))).into_response()
    }
}

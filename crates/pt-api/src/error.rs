//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pt_core::error::{TrackerError, ValidationErrors};
use serde::Serialize;

/// API error types
#[derive(Debug)]
pub enum ApiError {
    NotFound { resource: &'static str, id: String },
    Validation(ValidationErrors),
    Unauthorized(String),
    BadRequest(String),
    Conflict(String),
    Internal(String),
}

impl ApiError {
    pub fn not_found(resource: &'static str, id: impl std::fmt::Display) -> Self {
        ApiError::NotFound { resource, id: id.to_string() }
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        ApiError::Unauthorized(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        ApiError::BadRequest(msg.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ApiError::NotFound { .. } => "not_found",
            ApiError::Validation(_) => "validation_failed",
            ApiError::Unauthorized(_) => "unauthorized",
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Conflict(_) => "conflict",
            ApiError::Internal(_) => "internal_error",
        }
    }
}

impl From<TrackerError> for ApiError {
    fn from(err: TrackerError) -> Self {
        match err {
            TrackerError::NotFound { entity, value, .. } => ApiError::NotFound { resource: entity, id: value },
            TrackerError::Validation(errors) => ApiError::Validation(errors),
            TrackerError::Unauthorized { message } => ApiError::Unauthorized(message),
            TrackerError::Conflict { message } => ApiError::Conflict(message),
            err @ TrackerError::InvalidTransition { .. } => ApiError::Conflict(err.to_string()),
            TrackerError::Storage(message) | TrackerError::Internal(message) => {
                tracing::error!(error = %message, "Request failed");
                ApiError::Internal("Internal server error".into())
            }
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    error: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    details: Vec<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error = self.error_code();
        let (message, details) = match self {
            ApiError::NotFound { resource, id } => (format!("{} with id {} not found", resource, id), Vec::new()),
            ApiError::Validation(errors) => ("Validation failed".to_string(), errors.full_messages()),
            ApiError::Unauthorized(msg)
            | ApiError::BadRequest(msg)
            | ApiError::Conflict(msg)
            | ApiError::Internal(msg) => (msg, Vec::new()),
        };

        (status, Json(ErrorBody { error, message, details })).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

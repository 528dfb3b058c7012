//! API error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use bma_pipeline::PipelineError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Pipeline(e) => match e {
                PipelineError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
                PipelineError::StorageUnavailable(_) | PipelineError::ModelUnavailable(_) => {
                    StatusCode::SERVICE_UNAVAILABLE
                }
                PipelineError::ModelRefused(_) => StatusCode::UNPROCESSABLE_ENTITY,
                PipelineError::MalformedResponse(_) | PipelineError::SchemaViolation { .. } => {
                    StatusCode::BAD_GATEWAY
                }
            },
        }
    }

    fn code(&self) -> Option<&'static str> {
        match self {
            ApiError::Pipeline(e) => Some(match e {
                PipelineError::PayloadTooLarge { .. } => "payload_too_large",
                PipelineError::StorageUnavailable(_) => "storage_unavailable",
                PipelineError::ModelUnavailable(_) => "model_unavailable",
                PipelineError::ModelRefused(_) => "model_refused",
                PipelineError::MalformedResponse(_) => "malformed_response",
                PipelineError::SchemaViolation { .. } => "schema_violation",
            }),
            _ => None,
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Pipeline errors already have a safe user-facing message; raw
        // backend detail stays in the server logs only.
        let detail = match &self {
            ApiError::Pipeline(e) => e.user_message().to_string(),
            ApiError::Internal(_) => {
                if std::env::var("ENVIRONMENT").unwrap_or_default() == "production" {
                    "An internal error occurred".to_string()
                } else {
                    self.to_string()
                }
            }
            _ => self.to_string(),
        };

        let body = ErrorResponse {
            detail,
            code: self.code().map(str::to_string),
        };

        (status, Json(body)).into_response()
    }
}

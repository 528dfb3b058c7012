//! Storage error types.

use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to configure storage client: {0}")]
    ConfigError(String),

    #[error("Payload too large: {size_bytes} bytes exceeds the {limit_bytes} byte limit")]
    PayloadTooLarge { size_bytes: u64, limit_bytes: u64 },

    #[error("Authentication failed: {0}")]
    AuthError(String),

    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Storage backend returned {0}: {1}")]
    ServerError(u16, String),

    #[error("Invalid response from storage backend: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StorageError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn auth_error(msg: impl Into<String>) -> Self {
        Self::AuthError(msg.into())
    }

    pub fn upload_failed(msg: impl Into<String>) -> Self {
        Self::UploadFailed(msg.into())
    }

    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// Map a non-success HTTP status to a storage error.
    pub fn from_http_status(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        match status {
            401 | 403 => Self::AuthError(format!("status {status}: {body}")),
            429 => Self::RateLimited(body),
            500..=599 => Self::ServerError(status, body),
            _ => Self::UploadFailed(format!("status {status}: {body}")),
        }
    }

    /// Whether the operation is worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            StorageError::Network(_) | StorageError::RateLimited(_) | StorageError::ServerError(..)
        )
    }
}

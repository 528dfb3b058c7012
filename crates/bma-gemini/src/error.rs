//! Gateway error types.

use thiserror::Error;

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Errors from the model-invocation boundary.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Model backend unavailable: {0}")]
    Unavailable(String),

    #[error("Model refused the request: {0}")]
    Refused(String),

    #[error("Malformed model response: {0}")]
    Malformed(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl GatewayError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    pub fn refused(msg: impl Into<String>) -> Self {
        Self::Refused(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }

    /// Map a non-success HTTP status to a gateway error.
    ///
    /// Timeouts, throttling, and server errors are transient; anything
    /// else is a terminal request failure.
    pub fn from_http_status(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        match status {
            408 | 429 | 500..=599 => Self::Unavailable(format!("status {status}: {body}")),
            _ => Self::RequestFailed(format!("status {status}: {body}")),
        }
    }

    /// Whether a retry with backoff could help.
    ///
    /// Refusals are never retryable; retrying a content-policy rejection
    /// only repeats it.
    pub fn is_retryable(&self) -> bool {
        matches!(self, GatewayError::Unavailable(_) | GatewayError::Network(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            GatewayError::from_http_status(503, "down"),
            GatewayError::Unavailable(_)
        ));
        assert!(matches!(
            GatewayError::from_http_status(429, "slow"),
            GatewayError::Unavailable(_)
        ));
        assert!(matches!(
            GatewayError::from_http_status(400, "bad schema"),
            GatewayError::RequestFailed(_)
        ));
    }

    #[test]
    fn test_refusal_is_never_retryable() {
        assert!(!GatewayError::refused("safety").is_retryable());
        assert!(!GatewayError::malformed("not json").is_retryable());
        assert!(GatewayError::unavailable("timeout").is_retryable());
    }
}

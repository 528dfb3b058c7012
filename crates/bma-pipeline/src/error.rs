//! Pipeline error taxonomy.
//!
//! Adapters surface their typed errors upward; the orchestrator folds
//! them into this taxonomy and halts on any terminal error. No
//! partially-constructed record ever escapes.

use thiserror::Error;

use bma_gemini::GatewayError;
use bma_models::ValidationError;
use bma_storage::StorageError;

pub type PipelineResult<T> = Result<T, PipelineError>;

/// Everything that can end an analysis run without a record.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Input rejected before any I/O; the caller must resubmit smaller input.
    #[error("Payload too large: {size_bytes} bytes exceeds the {limit_bytes} byte limit")]
    PayloadTooLarge { size_bytes: u64, limit_bytes: u64 },

    /// Storage backend failed after retries were exhausted.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Model backend failed after retries were exhausted.
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    /// Content-policy rejection. Never retried.
    #[error("Model refused the request: {0}")]
    ModelRefused(String),

    /// The model's response was not parseable JSON.
    #[error("Malformed model response: {0}")]
    MalformedResponse(String),

    /// The response parsed but violated the schema contract.
    #[error("Schema violation at field '{field}'")]
    SchemaViolation { field: String },
}

impl PipelineError {
    /// Short user-facing message. Outages tell the user to try again;
    /// a refusal is worded so it cannot be mistaken for one.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::PayloadTooLarge { .. } => "The video exceeds the 200 MB limit. Please upload a smaller file.",
            Self::StorageUnavailable(_) | Self::ModelUnavailable(_) => {
                "The analysis service is temporarily unavailable. Please try again in a moment."
            }
            Self::ModelRefused(_) => {
                "The AI declined to analyze this video due to its content policy."
            }
            Self::MalformedResponse(_) | Self::SchemaViolation { .. } => {
                "The analysis produced an unusable result. The issue has been logged."
            }
        }
    }
}

impl From<StorageError> for PipelineError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::PayloadTooLarge {
                size_bytes,
                limit_bytes,
            } => Self::PayloadTooLarge {
                size_bytes,
                limit_bytes,
            },
            other => Self::StorageUnavailable(other.to_string()),
        }
    }
}

impl From<GatewayError> for PipelineError {
    fn from(e: GatewayError) -> Self {
        match e {
            GatewayError::Refused(msg) => Self::ModelRefused(msg),
            GatewayError::Malformed(msg) => Self::MalformedResponse(msg),
            other => Self::ModelUnavailable(other.to_string()),
        }
    }
}

impl From<ValidationError> for PipelineError {
    fn from(e: ValidationError) -> Self {
        match e {
            ValidationError::Malformed(msg) => Self::MalformedResponse(msg),
            ValidationError::SchemaViolation { field } => Self::SchemaViolation { field },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_payload_guard_maps_through() {
        let err: PipelineError = StorageError::PayloadTooLarge {
            size_bytes: 300,
            limit_bytes: 200,
        }
        .into();
        assert!(matches!(
            err,
            PipelineError::PayloadTooLarge {
                size_bytes: 300,
                limit_bytes: 200
            }
        ));
    }

    #[test]
    fn test_gateway_mapping() {
        assert!(matches!(
            PipelineError::from(GatewayError::refused("safety")),
            PipelineError::ModelRefused(_)
        ));
        assert!(matches!(
            PipelineError::from(GatewayError::malformed("not json")),
            PipelineError::MalformedResponse(_)
        ));
        assert!(matches!(
            PipelineError::from(GatewayError::unavailable("timeout")),
            PipelineError::ModelUnavailable(_)
        ));
    }

    #[test]
    fn test_validation_mapping_keeps_the_field() {
        let err: PipelineError = ValidationError::violation("marcas_match").into();
        assert!(matches!(
            err,
            PipelineError::SchemaViolation { field } if field == "marcas_match"
        ));
    }

    #[test]
    fn test_refusal_message_differs_from_outage_message() {
        let refusal = PipelineError::ModelRefused("safety".to_string());
        let outage = PipelineError::ModelUnavailable("503".to_string());
        assert_ne!(refusal.user_message(), outage.user_message());
    }
}

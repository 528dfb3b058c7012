//! The analysis pipeline.
//!
//! video bytes → blob store → URI → inference gateway → raw JSON →
//! validator → `BrandAnalysis`.

use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

use bma_gemini::{render_prompt, GatewayError, InferenceModel};
use bma_models::{validate, BrandAnalysis, VideoAsset, MAX_VIDEO_BYTES};
use bma_storage::{BlobStore, StorageError};

use crate::error::{PipelineError, PipelineResult};
use crate::retry::{retry_async, RetryPolicy};

/// Maximum length of a raw payload echoed into diagnostics.
const PAYLOAD_LOG_LIMIT: usize = 2048;

/// Pipeline configuration.
///
/// Passed into the constructor explicitly; there is no ambient state, so
/// tests can wire fake adapters deterministically.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Upper bound on the declared video size.
    pub max_video_bytes: u64,
    /// Retry policy for the storage write.
    pub storage_retry: RetryPolicy,
    /// Retry policy for the model call.
    pub model_retry: RetryPolicy,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            max_video_bytes: MAX_VIDEO_BYTES,
            storage_retry: RetryPolicy::default(),
            model_retry: RetryPolicy::default(),
        }
    }
}

/// The analysis pipeline, generic over its two network seams.
pub struct Analyzer<S, M> {
    store: S,
    model: M,
    config: AnalyzerConfig,
}

impl<S: BlobStore, M: InferenceModel> Analyzer<S, M> {
    /// Create a pipeline over the given adapters.
    pub fn new(store: S, model: M, config: AnalyzerConfig) -> Self {
        Self {
            store,
            model,
            config,
        }
    }

    /// Run one full analysis and return the validated record.
    ///
    /// The single entry point the presentation layer calls. Halts on the
    /// first terminal error; a partially-constructed record is never
    /// returned.
    pub async fn run_analysis(
        &self,
        bytes: Vec<u8>,
        size_bytes: u64,
        filename: &str,
    ) -> PipelineResult<BrandAnalysis> {
        let run_id = Uuid::new_v4();
        let span = info_span!("analysis_run", run_id = %run_id);
        self.run(bytes, size_bytes, filename).instrument(span).await
    }

    async fn run(
        &self,
        bytes: Vec<u8>,
        size_bytes: u64,
        filename: &str,
    ) -> PipelineResult<BrandAnalysis> {
        let mut asset = VideoAsset::new(bytes, size_bytes, filename);

        if asset.size_bytes > self.config.max_video_bytes {
            warn!(
                size_bytes = asset.size_bytes,
                limit = self.config.max_video_bytes,
                "rejecting oversize upload"
            );
            return Err(PipelineError::PayloadTooLarge {
                size_bytes: asset.size_bytes,
                limit_bytes: self.config.max_video_bytes,
            });
        }

        info!(size_bytes = asset.size_bytes, filename, "starting analysis");

        let stored = retry_async(
            &self.config.storage_retry,
            "persist_video",
            StorageError::is_retryable,
            || {
                self.store
                    .persist(asset.bytes.clone(), asset.size_bytes, &asset.filename)
            },
        )
        .await?;

        // The asset is now addressable by URI; the bytes are never re-sent.
        let video_uri = asset.uri.get_or_insert(stored.uri).clone();

        let prompt = render_prompt(&video_uri);
        let schema = bma_models::response_schema();

        let raw = retry_async(
            &self.config.model_retry,
            "generate_content",
            GatewayError::is_retryable,
            || self.model.infer(&video_uri, &prompt, &schema),
        )
        .await?;

        let record = match validate(&raw) {
            Ok(record) => record,
            Err(e) => {
                // The raw payload is the only evidence for diagnosing a
                // backend contract violation; keep it with the error.
                error!(
                    error = %e,
                    payload = %payload_snippet(&raw),
                    "model payload failed validation"
                );
                return Err(e.into());
            }
        };

        info!(
            video_uri = %video_uri,
            themes = record.themes.len(),
            brand_matches = record.brand_matches.len(),
            "analysis complete"
        );

        Ok(record)
    }
}

fn payload_snippet(raw: &str) -> String {
    if raw.len() <= PAYLOAD_LOG_LIMIT {
        raw.to_string()
    } else {
        let cut = raw
            .char_indices()
            .take_while(|(i, _)| *i < PAYLOAD_LOG_LIMIT)
            .last()
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        format!("{}… ({} bytes total)", &raw[..cut], raw.len())
    }
}

//! Gemini API client.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{GatewayError, GatewayResult};
use crate::types::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part,
};

/// Finish reasons that mean the model declined the content.
const REFUSAL_FINISH_REASONS: &[&str] = &["SAFETY", "PROHIBITED_CONTENT", "BLOCKLIST"];

/// Configuration for the Gemini client.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key.
    pub api_key: String,
    /// Model name.
    pub model: String,
    /// API base URL; overridable for tests.
    pub base_url: String,
    /// Request timeout. Video analysis is slow; default is generous.
    pub timeout: Duration,
    /// Connect timeout.
    pub connect_timeout: Duration,
}

impl GeminiConfig {
    /// Create config from environment variables.
    pub fn from_env() -> GatewayResult<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| GatewayError::config_error("GEMINI_API_KEY not set"))?;

        Ok(Self {
            api_key,
            model: std::env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-2.5-flash".to_string()),
            base_url: std::env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string()),
            timeout: Duration::from_secs(
                std::env::var("GEMINI_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(300),
            ),
            connect_timeout: Duration::from_secs(5),
        })
    }
}

/// The model-invocation boundary.
///
/// A single method, so tests can substitute a fake returning canned JSON
/// without any network dependency.
#[async_trait]
pub trait InferenceModel: Send + Sync {
    /// Perform exactly one model call and return the raw response text.
    async fn infer(
        &self,
        video_uri: &str,
        prompt: &str,
        schema: &Value,
    ) -> GatewayResult<String>;
}

/// Gemini API client.
pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Create a new Gemini client.
    pub fn new(config: GeminiConfig) -> GatewayResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(concat!("bma-gemini/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(GatewayError::Network)?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> GatewayResult<Self> {
        Self::new(GeminiConfig::from_env()?)
    }

    /// Call `generateContent` once with the video reference, the rendered
    /// prompt, and the response schema constraint.
    pub async fn generate(
        &self,
        video_uri: &str,
        prompt: &str,
        schema: &Value,
    ) -> GatewayResult<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.config.base_url, self.config.model, self.config.api_key
        );

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part::text(prompt), Part::video(video_uri)],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: schema.clone(),
            },
        };

        debug!(model = %self.config.model, video_uri, "Calling generateContent");

        let response = self.http.post(&url).json(&request).send().await.map_err(|e| {
            if e.is_timeout() || e.is_connect() {
                GatewayError::unavailable(e.to_string())
            } else {
                GatewayError::Network(e)
            }
        })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::from_http_status(status, body));
        }

        let envelope: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::malformed(format!("unparseable envelope: {e}")))?;

        if let Some(feedback) = &envelope.prompt_feedback {
            if let Some(reason) = &feedback.block_reason {
                return Err(GatewayError::refused(format!("prompt blocked: {reason}")));
            }
        }

        let candidate = envelope
            .candidates
            .first()
            .ok_or_else(|| GatewayError::malformed("no candidates in response"))?;

        if let Some(reason) = &candidate.finish_reason {
            if REFUSAL_FINISH_REASONS.contains(&reason.as_str()) {
                return Err(GatewayError::refused(format!("finish reason: {reason}")));
            }
        }

        let text: String = candidate
            .content
            .as_ref()
            .map(|c| {
                c.parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(GatewayError::malformed("no content in response"));
        }

        info!(model = %self.config.model, "Received model response");
        Ok(strip_code_fences(&text).to_string())
    }
}

#[async_trait]
impl InferenceModel for GeminiClient {
    async fn infer(
        &self,
        video_uri: &str,
        prompt: &str,
        schema: &Value,
    ) -> GatewayResult<String> {
        self.generate(video_uri, prompt, schema).await
    }
}

/// Strip a markdown code fence the model sometimes wraps JSON in.
fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    let text = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
        .unwrap_or(text);
    let text = text.strip_suffix("```").unwrap_or(text);
    text.trim()
}

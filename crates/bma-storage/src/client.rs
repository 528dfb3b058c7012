//! GCS client implementation.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{StorageError, StorageResult};
use crate::token::{AccessTokenSource, TokenCache};

/// Default upper bound for a single uploaded object: 200 MiB.
const DEFAULT_MAX_OBJECT_BYTES: u64 = 200 * 1024 * 1024;

/// Configuration for the GCS client.
#[derive(Debug, Clone)]
pub struct GcsConfig {
    /// Bucket name.
    pub bucket: String,
    /// API base URL; overridable for tests.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Connect timeout.
    pub connect_timeout: Duration,
    /// Upper bound for a single object.
    pub max_object_bytes: u64,
}

impl GcsConfig {
    /// Create config from environment variables.
    pub fn from_env() -> StorageResult<Self> {
        let bucket = std::env::var("GCP_BUCKET_NAME")
            .map_err(|_| StorageError::config_error("GCP_BUCKET_NAME not set"))?;

        if bucket.is_empty() {
            return Err(StorageError::config_error("GCP_BUCKET_NAME cannot be empty"));
        }

        Ok(Self {
            bucket,
            base_url: std::env::var("GCS_BASE_URL")
                .unwrap_or_else(|_| "https://storage.googleapis.com".to_string()),
            timeout: Duration::from_secs(
                std::env::var("GCS_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(120),
            ),
            connect_timeout: Duration::from_secs(
                std::env::var("GCS_CONNECT_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(5),
            ),
            max_object_bytes: DEFAULT_MAX_OBJECT_BYTES,
        })
    }
}

/// Receipt for a persisted video.
///
/// The `uri` is stable for the life of the object and is the reference
/// every downstream operation uses; the video bytes are never re-sent.
#[derive(Debug, Clone)]
pub struct StoredVideo {
    /// Stable `gs://bucket/object` reference.
    pub uri: String,
    /// Object name within the bucket.
    pub object_name: String,
    /// Persisted size in bytes.
    pub size_bytes: u64,
}

/// Durable persistence boundary for uploaded videos.
///
/// One method, so tests can substitute a fake without any network
/// dependency.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Persist the video and return its stable reference.
    async fn persist(
        &self,
        bytes: Vec<u8>,
        size_bytes: u64,
        filename: &str,
    ) -> StorageResult<StoredVideo>;
}

/// Google Cloud Storage client.
pub struct GcsClient {
    http: reqwest::Client,
    config: GcsConfig,
    tokens: Arc<dyn AccessTokenSource>,
}

#[derive(Debug, Deserialize)]
struct InsertResponse {
    name: String,
}

impl GcsClient {
    /// Create a new client using `GOOGLE_APPLICATION_CREDENTIALS` auth.
    pub fn new(config: GcsConfig) -> StorageResult<Self> {
        let tokens = Arc::new(TokenCache::from_env()?);
        Self::with_token_source(config, tokens)
    }

    /// Create a client with an explicit token source.
    pub fn with_token_source(
        config: GcsConfig,
        tokens: Arc<dyn AccessTokenSource>,
    ) -> StorageResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(concat!("bma-storage/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(StorageError::Network)?;

        Ok(Self {
            http,
            config,
            tokens,
        })
    }

    /// Create from environment variables.
    pub fn from_env() -> StorageResult<Self> {
        Self::new(GcsConfig::from_env()?)
    }

    /// Upload a video via the JSON media-upload API.
    ///
    /// The size precondition is checked before any network call; an
    /// oversize payload never leaves the process.
    pub async fn persist_video(
        &self,
        bytes: Vec<u8>,
        size_bytes: u64,
        filename: &str,
    ) -> StorageResult<StoredVideo> {
        if size_bytes > self.config.max_object_bytes {
            return Err(StorageError::PayloadTooLarge {
                size_bytes,
                limit_bytes: self.config.max_object_bytes,
            });
        }

        let object_name = format!(
            "uploads/{}_{}",
            Utc::now().format("%Y%m%d_%H%M%S"),
            sanitize_filename(filename)
        );

        let url = format!(
            "{}/upload/storage/v1/b/{}/o?uploadType=media&name={}",
            self.config.base_url,
            self.config.bucket,
            urlencoding::encode(&object_name)
        );

        debug!("Uploading {} bytes to {}", bytes.len(), object_name);

        let token = self.tokens.access_token().await?;
        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .header(reqwest::header::CONTENT_TYPE, "video/mp4")
            .body(bytes)
            .send()
            .await
            .map_err(StorageError::Network)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::from_http_status(status, body));
        }

        let inserted: InsertResponse = response
            .json()
            .await
            .map_err(|e| StorageError::invalid_response(e.to_string()))?;

        let uri = format!("gs://{}/{}", self.config.bucket, inserted.name);
        info!("Persisted video at {}", uri);

        Ok(StoredVideo {
            uri,
            object_name: inserted.name,
            size_bytes,
        })
    }
}

#[async_trait]
impl BlobStore for GcsClient {
    async fn persist(
        &self,
        bytes: Vec<u8>,
        size_bytes: u64,
        filename: &str,
    ) -> StorageResult<StoredVideo> {
        self.persist_video(bytes, size_bytes, filename).await
    }
}

/// Strip path components and replace characters GCS object names and
/// log lines are better off without.
fn sanitize_filename(filename: &str) -> String {
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);

    let sanitized: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.is_empty() {
        "video.mp4".to_string()
    } else {
        sanitized
    }
}

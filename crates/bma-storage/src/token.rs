//! Service-account token handling for GCS.
//!
//! Bearer tokens are cached with a refresh margin and refreshed through a
//! single-flight write lock, with graceful fallback to a still-usable
//! token when refresh fails.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::Utc;
use gcp_auth::{CustomServiceAccount, TokenProvider};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::error::{StorageError, StorageResult};

/// OAuth scope for GCS object reads and writes.
pub const GCS_SCOPE: &str = "https://www.googleapis.com/auth/devstorage.read_write";

/// Refresh tokens 60 seconds before expiry.
const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(60);

/// Conservative TTL when the provider reports no usable expiry.
const TOKEN_DEFAULT_TTL: Duration = Duration::from_secs(50 * 60);

/// Source of bearer tokens for storage requests.
///
/// The GCS client depends on this trait rather than on `gcp_auth`
/// directly, so HTTP-level tests can run without service-account JSON.
#[async_trait]
pub trait AccessTokenSource: Send + Sync {
    async fn access_token(&self) -> StorageResult<String>;
}

struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

impl CachedToken {
    fn is_fresh(&self) -> bool {
        Instant::now() + TOKEN_REFRESH_MARGIN < self.expires_at
    }

    fn is_usable(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

/// Thread-safe token cache backed by a `gcp_auth` provider.
pub struct TokenCache {
    provider: Arc<dyn TokenProvider>,
    cache: RwLock<Option<CachedToken>>,
}

impl TokenCache {
    /// Create a cache over an existing token provider.
    pub fn new(provider: Arc<dyn TokenProvider>) -> Self {
        Self {
            provider,
            cache: RwLock::new(None),
        }
    }

    /// Create a cache backed by the service account named in
    /// `GOOGLE_APPLICATION_CREDENTIALS`.
    pub fn from_env() -> StorageResult<Self> {
        let service_account = CustomServiceAccount::from_env()
            .map_err(|e| StorageError::auth_error(format!("Failed to load service account: {e}")))?;

        match service_account {
            Some(sa) => Ok(Self::new(Arc::new(sa))),
            None => Err(StorageError::auth_error(
                "GOOGLE_APPLICATION_CREDENTIALS not set. \
                 Set it to the path of your service account JSON file.",
            )),
        }
    }

    /// Drop the cached token, forcing a refresh on the next request.
    pub async fn invalidate(&self) {
        let mut cache = self.cache.write().await;
        *cache = None;
    }

    async fn get_token(&self) -> StorageResult<String> {
        {
            let cache = self.cache.read().await;
            if let Some(cached) = cache.as_ref() {
                if cached.is_fresh() {
                    return Ok(cached.access_token.clone());
                }
            }
        }

        let mut cache = self.cache.write().await;

        // Another task may have refreshed while we waited for the lock.
        if let Some(cached) = cache.as_ref() {
            if cached.is_fresh() {
                return Ok(cached.access_token.clone());
            }
        }

        match self.provider.token(&[GCS_SCOPE]).await {
            Ok(token) => {
                let access_token = token.as_str().to_string();

                let expires_at = {
                    let now = Utc::now();
                    let exp = token.expires_at();
                    if exp > now {
                        match (exp - now).to_std() {
                            Ok(ttl) => Instant::now() + ttl,
                            Err(_) => Instant::now() + TOKEN_DEFAULT_TTL,
                        }
                    } else {
                        Instant::now()
                    }
                };

                *cache = Some(CachedToken {
                    access_token: access_token.clone(),
                    expires_at,
                });

                debug!("Refreshed GCS auth token");
                Ok(access_token)
            }
            Err(e) => {
                if let Some(cached) = cache.as_ref() {
                    if cached.is_usable() {
                        warn!("Token refresh failed, reusing existing token: {e}");
                        return Ok(cached.access_token.clone());
                    }
                }
                Err(StorageError::auth_error(format!(
                    "Failed to obtain auth token: {e}"
                )))
            }
        }
    }
}

#[async_trait]
impl AccessTokenSource for TokenCache {
    async fn access_token(&self) -> StorageResult<String> {
        self.get_token().await
    }
}

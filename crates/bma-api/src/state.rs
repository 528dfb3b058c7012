//! Shared application state.

use std::sync::Arc;

use bma_pipeline::Analyzer;

use crate::config::ApiConfig;

/// State shared across request handlers.
///
/// Generic over the pipeline's two network seams so tests can wire fake
/// adapters behind the same router.
pub struct AppState<S, M> {
    pub analyzer: Arc<Analyzer<S, M>>,
    pub config: ApiConfig,
}

impl<S, M> AppState<S, M> {
    pub fn new(analyzer: Analyzer<S, M>, config: ApiConfig) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
            config,
        }
    }
}

impl<S, M> Clone for AppState<S, M> {
    fn clone(&self) -> Self {
        Self {
            analyzer: Arc::clone(&self.analyzer),
            config: self.config.clone(),
        }
    }
}

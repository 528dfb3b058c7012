//! Axum HTTP surface for the Brand Media Analyzer.
//!
//! Thin consumer of the pipeline: one upload-and-analyze endpoint, a
//! report endpoint over already-validated records, and a health check.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;

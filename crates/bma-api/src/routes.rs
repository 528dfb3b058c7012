//! Router assembly and request handlers.

use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use bma_gemini::InferenceModel;
use bma_models::BrandAnalysis;
use bma_report::{render_markdown, standard_charts, ChartSpec};
use bma_storage::BlobStore;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Assemble the application router.
pub fn create_router<S, M>(state: AppState<S, M>) -> Router
where
    S: BlobStore + 'static,
    M: InferenceModel + 'static,
{
    let body_limit = state.config.max_body_bytes;
    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        .route("/health", get(health))
        .route("/api/analyze", post(analyze::<S, M>))
        .route("/api/report", post(report))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(parsed))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// Health check endpoint.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}

/// Run one analysis over an uploaded video.
///
/// Expects a multipart body with a single `video` field (mp4). Returns
/// the validated record in its wire shape.
async fn analyze<S, M>(
    State(state): State<AppState<S, M>>,
    mut multipart: Multipart,
) -> ApiResult<Json<BrandAnalysis>>
where
    S: BlobStore + 'static,
    M: InferenceModel + 'static,
{
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("invalid multipart body: {e}")))?
    {
        if field.name() != Some("video") {
            continue;
        }

        let filename = field
            .file_name()
            .unwrap_or("video.mp4")
            .to_string();

        let is_mp4 = field
            .content_type()
            .map(|ct| ct == "video/mp4")
            .unwrap_or_else(|| filename.to_lowercase().ends_with(".mp4"));
        if !is_mp4 {
            return Err(ApiError::bad_request("only mp4 video uploads are accepted"));
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("failed to read upload: {e}")))?;

        let size_bytes = bytes.len() as u64;
        let record = state
            .analyzer
            .run_analysis(bytes.to_vec(), size_bytes, &filename)
            .await?;

        return Ok(Json(record));
    }

    warn!("analyze request without a video field");
    Err(ApiError::bad_request("missing 'video' multipart field"))
}

#[derive(Serialize)]
struct ReportResponse {
    report_markdown: String,
    charts: Vec<ChartSpec>,
}

/// Render the shareable report for an already-validated record.
async fn report(Json(record): Json<BrandAnalysis>) -> Json<ReportResponse> {
    Json(ReportResponse {
        report_markdown: render_markdown(&record),
        charts: standard_charts(&record),
    })
}

//! Axum route handlers for the anime guesser API.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, DefaultBodyLimit, State},
    http::{header, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use guesser_clip::Classifier;
use guesser_core::{AnalyzeRequest, ClassificationResult, ReExamineRequest};
use serde::Serialize;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::error::GatewayError;

// ── Shared state ─────────────────────────────────────────────────────────────

/// Classification backend shared by all handlers.
pub type Clip = Arc<dyn Classifier>;

/// Service name reported by `GET /api/health`.
pub const SERVICE_NAME: &str = "anime-guesser-api";

/// Upper bound on inbound bodies; encoded images are larger than axum's default.
/// Larger bodies are answered with 413 and the usual JSON error body.
pub const MAX_BODY_BYTES: usize = 32 * 1024 * 1024;

// ── Response types ────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub success: bool,
    pub message: &'static str,
}

// ── Router ────────────────────────────────────────────────────────────────────

/// Build the application router around the given classifier.
pub fn create_router(clip: Clip) -> Router {
    let api = Router::new()
        .route("/analyze", post(analyze_image))
        .route("/re-examine", post(re_examine_image))
        .route("/health", get(health))
        .route("/refresh-db", post(refresh_database));

    Router::new()
        .nest("/api", api)
        .with_state(clip)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
}

/// Any origin, the usual verbs, and the headers browsers send with JSON uploads.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::ORIGIN,
            header::CONTENT_LENGTH,
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
        ])
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// `GET /api/health` — static liveness payload; never consults upstream.
pub async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse { status: "healthy", service: SERVICE_NAME }),
    )
}

/// `POST /api/analyze` — classify an encoded image.
///
/// The body is read as raw bytes so that a missing or wrong `Content-Type`
/// still yields the same 400 as any other unparsable body.
///
/// # Errors
/// Returns [`GatewayError::UnreadableBody`] if the body exceeds the limit,
/// [`GatewayError::InvalidRequest`] if `image_data` is missing, or
/// [`GatewayError::Analyze`] if the upstream call fails.
pub async fn analyze_image(
    State(clip): State<Clip>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ClassificationResult>, GatewayError> {
    let req = AnalyzeRequest::parse(&body?)?;
    let result = clip
        .analyze_image(&req.image_data)
        .await
        .map_err(GatewayError::Analyze)?;
    tracing::info!(
        success = result.success,
        suggestions = result.suggestions.len(),
        "image analyzed"
    );
    Ok(Json(result))
}

/// `POST /api/re-examine` — classify again with exclusion/focus hints.
///
/// # Errors
/// Returns [`GatewayError::InvalidRequest`] if `image_data` is missing, or
/// [`GatewayError::ReExamine`] if the upstream call fails.
pub async fn re_examine_image(
    State(clip): State<Clip>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ClassificationResult>, GatewayError> {
    let req = ReExamineRequest::parse(&body?)?;
    let result = clip
        .re_examine_image(&req.image_data, &req.exclude_ids, &req.focus_ids, &req.search_type)
        .await
        .map_err(GatewayError::ReExamine)?;
    tracing::info!(
        search_type = %req.search_type,
        excluded = req.exclude_ids.len(),
        focused = req.focus_ids.len(),
        success = result.success,
        "image re-examined"
    );
    Ok(Json(result))
}

/// `POST /api/refresh-db` — ask upstream to rebuild its character database.
///
/// # Errors
/// Returns [`GatewayError::Refresh`] if the upstream call fails.
pub async fn refresh_database(
    State(clip): State<Clip>,
) -> Result<impl IntoResponse, GatewayError> {
    clip.refresh_database().await.map_err(GatewayError::Refresh)?;
    tracing::info!("database refresh initiated");
    Ok(Json(RefreshResponse { success: true, message: "Database refresh initiated" }))
}

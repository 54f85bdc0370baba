//! Error types for the gateway crate.

use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use guesser_clip::ClipError;
use guesser_core::CoreError;
use serde_json::json;

/// Errors that can occur during gateway request handling or startup.
///
/// The `Display` text is exactly what clients see in the `error` field.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GatewayError {
    /// The request body is malformed or lacks `image_data`.
    #[error("Invalid request format")]
    InvalidRequest(#[from] CoreError),

    /// The request body could not be read, e.g. it exceeds the size limit.
    #[error("Invalid request format")]
    UnreadableBody(#[from] BytesRejection),

    /// Upstream analyze call failed.
    #[error("Failed to analyze image: {0}")]
    Analyze(#[source] ClipError),

    /// Upstream re-examine call failed.
    #[error("Failed to re-examine image: {0}")]
    ReExamine(#[source] ClipError),

    /// Upstream database refresh failed.
    #[error("{0}")]
    Refresh(#[source] ClipError),

    /// A startup setting could not be parsed.
    #[error("invalid {key} value '{value}'")]
    InvalidConfig { key: &'static str, value: String },
}

impl GatewayError {
    /// HTTP status this error maps to.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::UnreadableBody(rejection) => rejection.status(),
            GatewayError::Analyze(_)
            | GatewayError::ReExamine(_)
            | GatewayError::Refresh(_)
            | GatewayError::InvalidConfig { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            GatewayError::InvalidRequest(cause) => {
                tracing::debug!(error = %cause, "rejected request body");
            }
            GatewayError::UnreadableBody(rejection) => {
                tracing::debug!(error = %rejection.body_text(), "unreadable request body");
            }
            other => tracing::warn!(error = %other, "request failed"),
        }
        (status, Json(json!({"success": false, "error": self.to_string()}))).into_response()
    }
}

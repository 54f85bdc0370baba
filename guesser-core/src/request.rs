//! Inbound request bodies accepted by the gateway.

use serde::Deserialize;

use crate::CoreError;

/// Body of `POST /api/analyze`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AnalyzeRequest {
    /// Encoded image payload (base64, optionally a data URL).
    #[serde(default)]
    pub image_data: String,
}

/// Body of `POST /api/re-examine`.
///
/// Only `image_data` is required; the id lists default to empty and the
/// search type to the empty string, which upstream treats as a plain search.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReExamineRequest {
    #[serde(default)]
    pub image_data: String,
    #[serde(default)]
    pub exclude_ids: Vec<i64>,
    #[serde(default)]
    pub focus_ids: Vec<i64>,
    #[serde(default)]
    pub search_type: String,
}

impl AnalyzeRequest {
    /// Parse and validate a raw JSON body.
    ///
    /// # Errors
    /// Returns [`CoreError::MalformedBody`] if the bytes are not a JSON object
    /// of the expected shape, or [`CoreError::MissingField`] if `image_data`
    /// is absent or empty.
    pub fn parse(body: &[u8]) -> Result<Self, CoreError> {
        let req: Self = serde_json::from_slice(body)?;
        require_image_data(&req.image_data)?;
        Ok(req)
    }
}

impl ReExamineRequest {
    /// Parse and validate a raw JSON body.
    ///
    /// # Errors
    /// Same as [`AnalyzeRequest::parse`].
    pub fn parse(body: &[u8]) -> Result<Self, CoreError> {
        let req: Self = serde_json::from_slice(body)?;
        require_image_data(&req.image_data)?;
        Ok(req)
    }
}

fn require_image_data(image_data: &str) -> Result<(), CoreError> {
    if image_data.is_empty() {
        return Err(CoreError::MissingField { field: "image_data" });
    }
    Ok(())
}

//! Classification backend abstraction.
//!
//! The gateway handlers are written against this trait rather than the
//! concrete HTTP client.

use async_trait::async_trait;
use guesser_core::ClassificationResult;
use serde_json::{Map, Value};

use crate::ClipError;

/// Operations the gateway relays to a classification service.
///
/// Implementations must be `Send + Sync` to be shared across request tasks.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Classify an encoded image.
    ///
    /// # Errors
    /// Returns [`ClipError::Transport`], [`ClipError::UpstreamStatus`] or
    /// [`ClipError::Decode`] when the call fails.
    async fn analyze_image(&self, image_data: &str) -> Result<ClassificationResult, ClipError>;

    /// Classify again, steering the search away from or towards given ids.
    ///
    /// # Errors
    /// Same as [`Classifier::analyze_image`].
    async fn re_examine_image(
        &self,
        image_data: &str,
        exclude_ids: &[i64],
        focus_ids: &[i64],
        search_type: &str,
    ) -> Result<ClassificationResult, ClipError>;

    /// Ask the service to rebuild its character database.
    ///
    /// # Errors
    /// Returns [`ClipError::Transport`] or [`ClipError::UpstreamStatus`].
    async fn refresh_database(&self) -> Result<(), ClipError>;

    /// Fetch the service's health document. Its shape is not fixed.
    ///
    /// # Errors
    /// Same as [`Classifier::analyze_image`].
    async fn health_check(&self) -> Result<Map<String, Value>, ClipError>;
}

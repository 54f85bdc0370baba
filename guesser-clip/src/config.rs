//! Connection settings for the CLIP service.

use std::time::Duration;

/// Environment variable holding the upstream base URL.
pub const BASE_URL_ENV: &str = "CLIP_SERVICE_URL";

/// Base URL used when [`BASE_URL_ENV`] is unset or empty.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8001";

/// Upper bound on a single upstream call: connect, send, and body read.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for [`crate::ClipClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct ClipConfig {
    /// Base URL without a trailing slash, e.g. `http://localhost:8001`.
    pub base_url: String,

    /// Per-call timeout.
    pub timeout: Duration,
}

impl ClipConfig {
    /// Create a config for the given base URL with the default timeout.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Replace the per-call timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read the base URL from `CLIP_SERVICE_URL`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var(BASE_URL_ENV).ok().as_deref())
    }

    /// Build a config from an optional environment value; empty counts as unset.
    #[must_use]
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(url) if !url.is_empty() => Self::new(url),
            _ => Self::new(DEFAULT_BASE_URL),
        }
    }
}

impl Default for ClipConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

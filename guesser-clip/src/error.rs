//! Error types for the CLIP client crate.

use std::fmt;

/// Upstream endpoints called by [`crate::ClipClient`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Endpoint {
    Analyze,
    ReExamine,
    RefreshDatabase,
    Health,
}

impl Endpoint {
    /// Path relative to the configured base URL.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Analyze => "/analyze",
            Endpoint::ReExamine => "/re-examine",
            Endpoint::RefreshDatabase => "/refresh-database",
            Endpoint::Health => "/health",
        }
    }

    fn decoded_as(self) -> &'static str {
        match self {
            Endpoint::Health => "health response",
            _ => "response",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Endpoint::Analyze | Endpoint::ReExamine => "CLIP service",
            Endpoint::RefreshDatabase => "refresh endpoint",
            Endpoint::Health => "health endpoint",
        };
        f.write_str(label)
    }
}

/// Errors that can occur while talking to the CLIP service.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ClipError {
    /// The configured base URL is not an absolute `http://` or `https://` URL.
    #[error("invalid CLIP service URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The TLS client configuration could not be built.
    #[error("failed to initialise TLS: {0}")]
    Tls(String),

    /// Connection failure, timeout, or broken response stream.
    #[error("failed to call {endpoint}: {reason}")]
    Transport { endpoint: Endpoint, reason: String },

    /// Upstream answered with a status other than `200 OK`.
    #[error("{endpoint} returned status {status}")]
    UpstreamStatus { endpoint: Endpoint, status: u16 },

    /// Upstream body was not valid JSON of the expected shape.
    #[error("failed to decode {}: {reason}", .endpoint.decoded_as())]
    Decode { endpoint: Endpoint, reason: String },
}

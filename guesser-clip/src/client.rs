//! HTTP client for the CLIP classification service.
//!
//! Built on the pooled hyper client with a rustls connector, so the base URL
//! may be `http://` or `https://`. Each call is a single attempt bounded by
//! [`ClipConfig::timeout`]; nothing is retried.

use std::error::Error as StdError;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use guesser_core::ClassificationResult;
use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::header::CONTENT_TYPE;
use hyper::{Method, Request, StatusCode, Uri};
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::{Classifier, ClipConfig, ClipError, Endpoint};

#[derive(Serialize)]
struct AnalyzeBody<'a> {
    image_data: &'a str,
}

/// Outbound re-examine body. Every field is always serialized, empty id
/// lists included.
#[derive(Serialize)]
struct ReExamineBody<'a> {
    image_data: &'a str,
    exclude_ids: &'a [i64],
    focus_ids: &'a [i64],
    search_type: &'a str,
}

/// Client for the CLIP service.
///
/// Cheap to share behind an `Arc`: the only state is the immutable config
/// and hyper's connection pool.
#[derive(Debug, Clone)]
pub struct ClipClient {
    config: ClipConfig,
    http: Client<HttpsConnector<HttpConnector>, Full<Bytes>>,
}

impl ClipClient {
    /// Create a client for the configured base URL.
    ///
    /// # Errors
    /// Returns [`ClipError::InvalidUrl`] if the base URL is not an absolute
    /// `http://` or `https://` URL, or [`ClipError::Tls`] if the TLS
    /// configuration cannot be built.
    pub fn new(config: ClipConfig) -> Result<Self, ClipError> {
        validate_base_url(&config.base_url)?;
        let http = Client::builder(TokioExecutor::new()).build(build_connector()?);
        Ok(Self { config, http })
    }

    /// The configuration this client was built with.
    #[must_use]
    pub fn config(&self) -> &ClipConfig {
        &self.config
    }

    async fn post_json<B: Serialize>(
        &self,
        endpoint: Endpoint,
        body: &B,
    ) -> Result<Bytes, ClipError> {
        let payload = serde_json::to_vec(body).map_err(|e| ClipError::Transport {
            endpoint,
            reason: format!("failed to marshal request: {e}"),
        })?;
        self.send(endpoint, Method::POST, Bytes::from(payload)).await
    }

    /// Issue one request and return the body of a `200 OK` response.
    async fn send(
        &self,
        endpoint: Endpoint,
        method: Method,
        body: Bytes,
    ) -> Result<Bytes, ClipError> {
        let transport = |reason: String| ClipError::Transport { endpoint, reason };

        let uri = format!("{}{}", self.config.base_url, endpoint.path())
            .parse::<Uri>()
            .map_err(|e| transport(format!("invalid URI: {e}")))?;

        let req = Request::builder()
            .method(method)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Full::new(body))
            .map_err(|e| transport(format!("build request: {e}")))?;

        let start = Instant::now();
        let exchange = async {
            let resp = self
                .http
                .request(req)
                .await
                .map_err(|e| transport(error_chain(&e)))?;
            let status = resp.status();
            let bytes = resp
                .into_body()
                .collect()
                .await
                .map_err(|e| transport(format!("read response body: {e}")))?
                .to_bytes();
            Ok::<_, ClipError>((status, bytes))
        };

        let (status, bytes) = tokio::time::timeout(self.config.timeout, exchange)
            .await
            .map_err(|_| {
                transport(format!("request timed out after {:?}", self.config.timeout))
            })??;

        tracing::debug!(
            endpoint = endpoint.path(),
            status = status.as_u16(),
            elapsed_ms = start.elapsed().as_millis(),
            "CLIP service responded"
        );

        if status != StatusCode::OK {
            return Err(ClipError::UpstreamStatus { endpoint, status: status.as_u16() });
        }
        Ok(bytes)
    }
}

#[async_trait]
impl Classifier for ClipClient {
    async fn analyze_image(&self, image_data: &str) -> Result<ClassificationResult, ClipError> {
        let endpoint = Endpoint::Analyze;
        let bytes = self.post_json(endpoint, &AnalyzeBody { image_data }).await?;
        decode(endpoint, &bytes)
    }

    async fn re_examine_image(
        &self,
        image_data: &str,
        exclude_ids: &[i64],
        focus_ids: &[i64],
        search_type: &str,
    ) -> Result<ClassificationResult, ClipError> {
        let endpoint = Endpoint::ReExamine;
        let body = ReExamineBody { image_data, exclude_ids, focus_ids, search_type };
        let bytes = self.post_json(endpoint, &body).await?;
        decode(endpoint, &bytes)
    }

    async fn refresh_database(&self) -> Result<(), ClipError> {
        self.send(Endpoint::RefreshDatabase, Method::POST, Bytes::new())
            .await
            .map(|_| ())
    }

    async fn health_check(&self) -> Result<Map<String, Value>, ClipError> {
        let endpoint = Endpoint::Health;
        let bytes = self.send(endpoint, Method::GET, Bytes::new()).await?;
        decode(endpoint, &bytes)
    }
}

fn decode<T: DeserializeOwned>(endpoint: Endpoint, bytes: &[u8]) -> Result<T, ClipError> {
    serde_json::from_slice(bytes)
        .map_err(|e| ClipError::Decode { endpoint, reason: e.to_string() })
}

/// Connector speaking plain HTTP or TLS depending on the URL scheme,
/// trusting the bundled webpki roots.
fn build_connector() -> Result<HttpsConnector<HttpConnector>, ClipError> {
    let provider = Arc::new(rustls::crypto::ring::default_provider());
    let connector = HttpsConnectorBuilder::new()
        .with_provider_and_webpki_roots(provider)
        .map_err(|e| ClipError::Tls(e.to_string()))?
        .https_or_http()
        .enable_http1()
        .build();
    Ok(connector)
}

fn validate_base_url(url: &str) -> Result<(), ClipError> {
    let invalid = |reason: &str| ClipError::InvalidUrl {
        url: url.to_owned(),
        reason: reason.to_owned(),
    };
    let uri = url.parse::<Uri>().map_err(|e| invalid(&e.to_string()))?;
    if !matches!(uri.scheme_str(), Some("http" | "https")) {
        return Err(invalid("scheme must be http or https"));
    }
    if uri.authority().is_none() {
        return Err(invalid("missing host"));
    }
    Ok(())
}

/// Render an error with its source chain, e.g.
/// `client error (Connect): tcp connect error: Connection refused`.
fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

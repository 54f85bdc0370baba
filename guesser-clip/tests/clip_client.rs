//! Integration tests: `ClipClient` against a fake CLIP service.
//!
//! Each test binds a real axum server on an ephemeral loopback port and
//! points the client at it.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use guesser_clip::{Classifier, ClipClient, ClipConfig, ClipError, Endpoint};
use serde_json::{json, Value};

type Captured = Arc<Mutex<Option<Value>>>;

async fn spawn_upstream(app: Router) -> SocketAddr {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:0").await {
        Ok(l) => l,
        Err(e) => panic!("failed to bind fake upstream: {e}"),
    };
    let addr = match listener.local_addr() {
        Ok(a) => a,
        Err(e) => panic!("no local addr: {e}"),
    };
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

fn client_for(addr: SocketAddr) -> ClipClient {
    client_with(ClipConfig::new(format!("http://{addr}")))
}

fn client_with(config: ClipConfig) -> ClipClient {
    match ClipClient::new(config) {
        Ok(c) => c,
        Err(e) => panic!("failed to build client: {e}"),
    }
}

fn sample_result() -> Value {
    json!({
        "success": true,
        "character": {
            "id": 40,
            "name": "Levi Ackerman",
            "anime": "Attack on Titan",
            "description": "Captain of the Survey Corps",
            "image_url": "https://img.example/40.png",
            "confidence": 0.91
        },
        "suggestions": [
            {
                "id": 41,
                "name": "Mikasa Ackerman",
                "anime": "Attack on Titan",
                "description": "Survey Corps soldier",
                "image_url": "https://img.example/41.png",
                "confidence": 0.55
            }
        ]
    })
}

#[tokio::test]
async fn analyze_returns_decoded_upstream_result() {
    let captured: Captured = Arc::default();
    let app = Router::new()
        .route(
            "/analyze",
            post(|State(seen): State<Captured>, Json(body): Json<Value>| async move {
                *seen.lock().unwrap_or_else(std::sync::PoisonError::into_inner) = Some(body);
                Json(sample_result())
            }),
        )
        .with_state(captured.clone());
    let client = client_for(spawn_upstream(app).await);

    let result = match client.analyze_image("aGVsbG8=").await {
        Ok(r) => r,
        Err(e) => panic!("analyze failed: {e}"),
    };
    assert!(result.success);
    assert_eq!(result.character.as_ref().map(|c| c.id), Some(40));
    assert_eq!(result.suggestions.len(), 1);

    let sent = captured.lock().unwrap_or_else(std::sync::PoisonError::into_inner).clone();
    assert_eq!(sent, Some(json!({"image_data": "aGVsbG8="})));
}

#[tokio::test]
async fn re_examine_sends_all_four_fields() {
    let captured: Captured = Arc::default();
    let app = Router::new()
        .route(
            "/re-examine",
            post(|State(seen): State<Captured>, Json(body): Json<Value>| async move {
                *seen.lock().unwrap_or_else(std::sync::PoisonError::into_inner) = Some(body);
                Json(json!({"success": true, "suggestions": []}))
            }),
        )
        .with_state(captured.clone());
    let client = client_for(spawn_upstream(app).await);

    let result = client.re_examine_image("abc", &[1, 2], &[], "strict").await;
    assert!(result.is_ok(), "re-examine failed: {result:?}");

    let sent = captured.lock().unwrap_or_else(std::sync::PoisonError::into_inner).clone();
    assert_eq!(
        sent,
        Some(json!({
            "image_data": "abc",
            "exclude_ids": [1, 2],
            "focus_ids": [],
            "search_type": "strict"
        }))
    );
}

#[tokio::test]
async fn non_200_status_is_upstream_status_error() {
    let app = Router::new().route(
        "/analyze",
        post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "model loading") }),
    );
    let client = client_for(spawn_upstream(app).await);

    match client.analyze_image("abc").await {
        Err(ClipError::UpstreamStatus { endpoint, status }) => {
            assert_eq!(endpoint, Endpoint::Analyze);
            assert_eq!(status, 503);
        }
        other => panic!("expected UpstreamStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn other_success_codes_are_still_errors() {
    let app = Router::new().route(
        "/analyze",
        post(|| async { (StatusCode::ACCEPTED, Json(sample_result())) }),
    );
    let client = client_for(spawn_upstream(app).await);

    let err = client.analyze_image("abc").await;
    assert!(
        matches!(err, Err(ClipError::UpstreamStatus { status: 202, .. })),
        "only 200 counts as success, got {err:?}"
    );
}

#[tokio::test]
async fn malformed_body_is_decode_error() {
    let app = Router::new().route("/analyze", post(|| async { "<html>oops</html>" }));
    let client = client_for(spawn_upstream(app).await);

    match client.analyze_image("abc").await {
        Err(e @ ClipError::Decode { .. }) => {
            assert!(e.to_string().starts_with("failed to decode response"));
        }
        other => panic!("expected Decode, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_upstream_is_transport_error() {
    // Reserve a port, then free it so nothing is listening there.
    let addr = {
        let listener = match tokio::net::TcpListener::bind("127.0.0.1:0").await {
            Ok(l) => l,
            Err(e) => panic!("failed to bind: {e}"),
        };
        match listener.local_addr() {
            Ok(a) => a,
            Err(e) => panic!("no local addr: {e}"),
        }
    };
    let client = client_for(addr);

    let start = Instant::now();
    match client.analyze_image("abc").await {
        Err(e @ ClipError::Transport { .. }) => {
            assert!(e.to_string().starts_with("failed to call CLIP service: "));
        }
        other => panic!("expected Transport, got {other:?}"),
    }
    assert!(start.elapsed() < client.config().timeout, "must fail within the timeout");
}

#[tokio::test]
async fn slow_upstream_times_out() {
    let app = Router::new().route(
        "/analyze",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(sample_result())
        }),
    );
    let addr = spawn_upstream(app).await;
    let client = client_with(
        ClipConfig::new(format!("http://{addr}")).with_timeout(Duration::from_millis(200)),
    );

    let start = Instant::now();
    match client.analyze_image("abc").await {
        Err(ClipError::Transport { reason, .. }) => {
            assert!(reason.contains("timed out"), "unexpected reason: {reason}");
        }
        other => panic!("expected Transport timeout, got {other:?}"),
    }
    assert!(start.elapsed() < Duration::from_secs(2), "timeout must bound the call");
}

#[tokio::test]
async fn refresh_database_ignores_response_body() {
    let app = Router::new().route("/refresh-database", post(|| async { "not json at all" }));
    let client = client_for(spawn_upstream(app).await);

    let result = client.refresh_database().await;
    assert!(result.is_ok(), "refresh must not parse the body: {result:?}");
}

#[tokio::test]
async fn refresh_database_failure_names_refresh_endpoint() {
    let app = Router::new().route(
        "/refresh-database",
        post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let client = client_for(spawn_upstream(app).await);

    match client.refresh_database().await {
        Err(e) => assert_eq!(e.to_string(), "refresh endpoint returned status 500"),
        Ok(()) => panic!("expected refresh failure"),
    }
}

#[tokio::test]
async fn health_check_decodes_arbitrary_object() {
    let app = Router::new().route(
        "/health",
        get(|| async {
            Json(json!({"status": "healthy", "model_device": "cpu", "characters_count": 120}))
        }),
    );
    let client = client_for(spawn_upstream(app).await);

    let health = match client.health_check().await {
        Ok(h) => h,
        Err(e) => panic!("health check failed: {e}"),
    };
    assert_eq!(health.get("status"), Some(&json!("healthy")));
    assert_eq!(health.get("characters_count"), Some(&json!(120)));
}

#[tokio::test]
async fn health_check_rejects_non_object() {
    let app = Router::new().route("/health", get(|| async { Json(json!(["healthy"])) }));
    let client = client_for(spawn_upstream(app).await);

    let err = client.health_check().await;
    assert!(matches!(err, Err(ClipError::Decode { endpoint: Endpoint::Health, .. })));
}

//! Entry point for the `guesser-gateway` HTTP server.

use std::sync::Arc;

use guesser_clip::{Classifier, ClipClient, ClipConfig};
use guesser_gateway::{config::GatewayConfig, routes::create_router};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Must run before any configuration is read.
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match dotenv {
        Ok(path) => info!(path = %path.display(), "loaded environment file"),
        Err(e) => debug!(error = %e, "no .env file loaded"),
    }

    let config = match GatewayConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, "invalid gateway configuration");
            std::process::exit(1);
        }
    };

    let clip = match ClipClient::new(ClipConfig::from_env()) {
        Ok(c) => Arc::new(c),
        Err(e) => {
            error!(error = %e, "invalid CLIP service configuration");
            std::process::exit(1);
        }
    };
    let clip_url = clip.config().base_url.clone();

    tokio::spawn(probe_upstream(Arc::clone(&clip)));

    let app = create_router(clip);
    let addr = config.listen_addr();

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            error!(addr = %addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };

    info!(addr = %addr, clip_url = %clip_url, "guesser-gateway listening");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(error = %e, "server error");
        std::process::exit(1);
    }
}

/// Log whether the CLIP service answers its health endpoint. Never fatal.
async fn probe_upstream(clip: Arc<ClipClient>) {
    match clip.health_check().await {
        Ok(health) => info!(?health, "CLIP service reachable"),
        Err(e) => warn!(error = %e, "CLIP service not reachable yet"),
    }
}

/// Resolve on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("shutdown signal received, draining connections");
}

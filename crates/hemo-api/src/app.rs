//! Application builder and server loop.

use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::middleware as axum_middleware;
use tokio::sync::Notify;
use tower_http::trace::TraceLayer;

use hemo_core::config::{CorsConfig, ServerConfig};
use hemo_core::error::AppError;

use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState, cors_config: &CorsConfig) -> Router {
    let cors = build_cors_layer(cors_config, &state.config.tenancy.root_domain);
    build_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(request_logging))
}

/// Binds the configured address and serves until Ctrl+C or SIGTERM.
///
/// After the signal, in-flight requests get `shutdown_grace_seconds` to
/// finish before the remaining connections are dropped.
pub async fn serve(state: AppState) -> Result<(), AppError> {
    let server: ServerConfig = state.config.server.clone();
    let app = build_app(state, &server.cors);

    let addr = format!("{}:{}", server.host, server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!(address = %addr, "Hemo server listening");

    let stopping = Arc::new(Notify::new());
    let signal = {
        let stopping = Arc::clone(&stopping);
        async move {
            shutdown_signal().await;
            stopping.notify_one();
        }
    };
    let grace = Duration::from_secs(server.shutdown_grace_seconds);
    let deadline = async move {
        stopping.notified().await;
        tokio::time::sleep(grace).await;
    };

    let running = axum::serve(listener, app)
        .with_graceful_shutdown(signal)
        .into_future();

    tokio::select! {
        result = running => {
            result.map_err(|e| AppError::internal(format!("Server error: {e}")))?;
        }
        _ = deadline => {
            tracing::warn!(
                grace_seconds = grace.as_secs(),
                "Grace period elapsed; dropping open connections"
            );
        }
    }

    tracing::info!("Hemo server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received; draining connections");
}

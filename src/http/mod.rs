//! HTTP transport for the voice detection API.
//!
//! An Axum server exposing `POST /api/voice-detection` (guarded by the
//! `x-api-key` header) and an unauthenticated `GET /health` liveness probe.
//! Detection runs on the blocking thread pool so DSP never stalls the
//! runtime.

mod routes;

pub use routes::{build_router, run_http_server, AppState, HealthResponse, HttpServerError};

/// Resolves when the process receives Ctrl-C.
pub async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => log::info!("Shutdown signal received, draining connections"),
        Err(err) => log::error!("Failed to listen for shutdown signal: {}", err),
    }
}

//! HTTP API
//!
//! `POST /analyze`, `POST /explain` and `GET /health`. Every error body is
//! `{ "detail": string }`.

mod error;
mod handlers;

pub use error::ApiError;

use crate::engine::Analyzer;
use crate::explain::Explainer;
use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<Analyzer>,
    pub explainer: Arc<dyn Explainer>,
}

impl AppState {
    /// Create state from the pipeline and an explainer
    pub fn new(analyzer: Arc<Analyzer>, explainer: Arc<dyn Explainer>) -> Self {
        Self {
            analyzer,
            explainer,
        }
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/analyze", post(handlers::analyze))
        .route("/explain", post(handlers::explain))
        .fallback(handlers::not_found)
        .with_state(state)
}

/// Serve the API until the process is stopped
pub async fn serve(bind: &str, state: AppState) -> anyhow::Result<()> {
    let addr: SocketAddr = bind
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid bind address {}: {}", bind, e))?;
    let listener = TcpListener::bind(addr).await?;

    tracing::info!(%addr, paths = state.analyzer.paths(), "HTTP API listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("HTTP API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

//! HTTP surface.
//!
//! This module handles:
//! - Router and shared-state construction
//! - Request handlers for the diagram/docx/pptx endpoints
//! - Mapping pipeline errors to HTTP responses
//!
//! Handlers share no mutable state; the only shared object is the injected
//! rendering engine behind an `Arc`.

mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context as _;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use crate::diagram::DiagramRenderer;

pub use handlers::ApiError;

/// Shared application state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    /// The diagram rendering engine. Swapped for a stub in tests.
    pub renderer: Arc<dyn DiagramRenderer>,
}

impl AppState {
    pub fn new(renderer: Arc<dyn DiagramRenderer>) -> Self {
        Self { renderer }
    }
}

/// Build the service router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/generate-diagram/", post(handlers::generate_diagram))
        .route("/example-diagram-data", get(handlers::example_diagram_data))
        .route("/generate-docx/", post(handlers::generate_docx))
        .route("/generate-pptx/", post(handlers::generate_pptx))
        .route("/health", get(handlers::health))
        .with_state(state)
}

/// Bind `addr` and serve requests until the process is terminated.
///
/// # Errors
///
/// Returns an error if the listener cannot be bound or the server fails.
pub async fn serve(addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "listening");
    axum::serve(listener, router(state))
        .await
        .context("server error")
}

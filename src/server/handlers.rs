//! Request handlers and error-to-response mapping.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{error, info};

use crate::diagram::{self, ImageFormat, RenderError};
use crate::model::{
    example_diagram_request, DiagramRequest, DocumentRequest, PresentationRequest,
};
use crate::office::{build_docx, build_pptx, PackageError};

use super::AppState;

/// An error response in the wire format `{"detail": ...}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    fn internal(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: detail.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}

impl From<RenderError> for ApiError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::EngineNotFound { .. } => Self {
                status: StatusCode::SERVICE_UNAVAILABLE,
                detail: err.to_string(),
            },
            RenderError::RenderFailed { ref stderr, .. } => Self::internal(format!(
                "Graphviz rendering failed. Stderr: {stderr}"
            )),
            RenderError::Io(_) => Self::internal(format!("An unexpected error occurred: {err}")),
        }
    }
}

impl From<PackageError> for ApiError {
    fn from(err: PackageError) -> Self {
        Self::internal(format!("Failed to assemble document package: {err}"))
    }
}

/// Run a blocking generator on the blocking thread pool.
///
/// The subprocess call (and, for symmetry, the zip assembly) must not stall
/// the async scheduler.
async fn run_blocking<T, E>(task: impl FnOnce() -> Result<T, E> + Send + 'static) -> Result<T, ApiError>
where
    T: Send + 'static,
    E: Into<ApiError> + Send + 'static,
{
    match tokio::task::spawn_blocking(task).await {
        Ok(result) => result.map_err(Into::into),
        Err(join_err) => {
            error!(%join_err, "blocking generator task panicked");
            Err(ApiError::internal("An unexpected error occurred"))
        }
    }
}

/// `POST /generate-diagram/`: compile the graph and render it to PNG.
pub(super) async fn generate_diagram(
    State(state): State<AppState>,
    Json(request): Json<DiagramRequest>,
) -> Result<Response, ApiError> {
    info!(
        nodes = request.nodes.len(),
        connections = request.connections.len(),
        "generating diagram"
    );
    let renderer = Arc::clone(&state.renderer);
    let bytes = run_blocking(move || {
        diagram::generate_image(renderer.as_ref(), &request, ImageFormat::Png)
    })
    .await?;

    Ok((
        [(header::CONTENT_TYPE, ImageFormat::Png.media_type())],
        bytes,
    )
        .into_response())
}

/// `GET /example-diagram-data`: canonical example payload for client testing.
pub(super) async fn example_diagram_data() -> Json<DiagramRequest> {
    Json(example_diagram_request())
}

/// `POST /generate-docx/`: fill the document template and return the bytes.
pub(super) async fn generate_docx(
    Json(request): Json<DocumentRequest>,
) -> Result<Response, ApiError> {
    info!(title = %request.title, "generating docx");
    let (bytes, filename) = run_blocking(move || build_docx(&request)).await?;
    Ok(attachment_response(
        bytes,
        &filename,
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ))
}

/// `POST /generate-pptx/`: fill the deck template and return the bytes.
pub(super) async fn generate_pptx(
    Json(request): Json<PresentationRequest>,
) -> Result<Response, ApiError> {
    info!(title = %request.title, "generating pptx");
    let (bytes, filename) = run_blocking(move || build_pptx(&request)).await?;
    Ok(attachment_response(
        bytes,
        &filename,
        "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    ))
}

/// `GET /health`: liveness probe.
pub(super) async fn health() -> StatusCode {
    StatusCode::OK
}

fn attachment_response(bytes: Vec<u8>, filename: &str, media_type: &str) -> Response {
    (
        [
            (header::CONTENT_TYPE, media_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response()
}

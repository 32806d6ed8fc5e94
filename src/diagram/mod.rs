//! Diagram generation pipeline.
//!
//! This module handles:
//! - Mapping semantic node/connection types to visual styles
//! - Compiling a graph description into a DOT document
//! - Invoking Graphviz to render the document to an image

mod dot;
mod render;
mod style;

pub use dot::{compile, sanitize_id, FOOTER_NODE_ID};
pub use render::{DiagramRenderer, GraphvizRenderer, ImageFormat, RenderError};
pub use style::{edge_style, node_style, EdgeStyle, NodeStyle};

use crate::model::DiagramRequest;

/// Run the full pipeline: compile the request and render it with `renderer`.
///
/// # Errors
///
/// Returns a [`RenderError`] if the engine cannot be invoked or rejects the
/// compiled document. Compilation itself never fails; invalid connection
/// references are dropped with a warning.
pub fn generate_image(
    renderer: &dyn DiagramRenderer,
    request: &DiagramRequest,
    format: ImageFormat,
) -> Result<Vec<u8>, RenderError> {
    let document = compile(request);
    tracing::debug!(bytes = document.len(), "compiled DOT document");
    renderer.render(&document, format)
}

#[cfg(test)]
mod tests {
    use crate::model::example_diagram_request;

    use super::*;

    /// Engine stub that records the document it was handed.
    struct CapturingRenderer;

    impl DiagramRenderer for CapturingRenderer {
        fn render(&self, dot: &str, _format: ImageFormat) -> Result<Vec<u8>, RenderError> {
            Ok(dot.as_bytes().to_vec())
        }
    }

    #[test]
    fn test_pipeline_feeds_compiled_document_to_renderer() {
        let request = example_diagram_request();
        let bytes = generate_image(&CapturingRenderer, &request, ImageFormat::Png).unwrap();
        let document = String::from_utf8(bytes).unwrap();
        assert!(document.starts_with("digraph G {"));
        assert!(document.contains(FOOTER_NODE_ID));
    }
}

// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. diagram::DiagramRenderer)
    clippy::module_name_repetitions
)]

//! # Docforge
//!
//! An HTTP service that turns structured JSON into rendered office artifacts:
//!
//! - Network-architecture diagrams (Graphviz → PNG)
//! - Word-processor documents (`.docx`)
//! - Slide decks (`.pptx`)
//!
//! ## Architecture
//!
//! The diagram pipeline is the heart of the service and runs in three stages:
//! - **Style policy**: static lookup tables mapping semantic node/connection
//!   types to visual attributes
//! - **Graph compiler**: JSON graph description → DOT document
//! - **Render invoker**: Graphviz subprocess → image bytes
//!
//! The document and presentation generators are fixed-template OOXML writers.
//!
//! ## Modules
//!
//! - [`diagram`]: Graph compilation and Graphviz rendering
//! - [`office`]: docx/pptx package assembly
//! - [`server`]: axum router and request handlers
//! - [`model`]: request payloads shared by all endpoints
//! - [`config`]: flag-file and CLI configuration

pub mod config;
pub mod diagram;
pub mod model;
pub mod office;
pub mod server;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::diagram::{DiagramRenderer, GraphvizRenderer, ImageFormat, RenderError};
    pub use crate::model::DiagramRequest;
    pub use crate::server::{router, AppState};
}

//! Render invoker: Graphviz subprocess execution.
//!
//! The engine is modelled as an injected capability ([`DiagramRenderer`]) so
//! the HTTP layer and tests can swap a stub for the real subprocess. The
//! production implementation streams the DOT document over stdin and collects
//! image bytes from stdout; no temporary files are involved.

use std::io::Write as _;
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};

use thiserror::Error;

/// Target image format for a render call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImageFormat {
    #[default]
    Png,
    Svg,
}

impl ImageFormat {
    /// The `-T` argument Graphviz expects for this format.
    pub fn dot_flag(self) -> &'static str {
        match self {
            Self::Png => "-Tpng",
            Self::Svg => "-Tsvg",
        }
    }

    pub fn media_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Svg => "image/svg+xml",
        }
    }
}

/// Failure modes of a render call, each mapped to a distinct HTTP response
/// by the server layer.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The engine executable is missing from the host.
    #[error("graphviz executable '{binary}' not found; install Graphviz and ensure it is on PATH")]
    EngineNotFound { binary: String },
    /// The engine ran but rejected the document.
    #[error("graphviz exited with {status}: {stderr}")]
    RenderFailed { status: ExitStatus, stderr: String },
    /// Anything else that went wrong talking to the process.
    #[error("failed to run graphviz: {0}")]
    Io(#[from] std::io::Error),
}

/// A rendering engine that turns a DOT document into image bytes.
///
/// One blocking call per render; callers that care about scheduling run it
/// off the async executor.
pub trait DiagramRenderer: Send + Sync {
    /// Render `dot` to the requested format.
    ///
    /// # Errors
    ///
    /// Returns a [`RenderError`] if the engine is missing, exits non-zero, or
    /// the process cannot be driven.
    fn render(&self, dot: &str, format: ImageFormat) -> Result<Vec<u8>, RenderError>;
}

/// The production engine: spawns the Graphviz `dot` binary.
#[derive(Debug, Clone)]
pub struct GraphvizRenderer {
    binary: PathBuf,
}

impl GraphvizRenderer {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for GraphvizRenderer {
    fn default() -> Self {
        Self::new("dot")
    }
}

impl DiagramRenderer for GraphvizRenderer {
    fn render(&self, dot: &str, format: ImageFormat) -> Result<Vec<u8>, RenderError> {
        let mut child = Command::new(&self.binary)
            .arg(format.dot_flag())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| {
                if err.kind() == std::io::ErrorKind::NotFound {
                    RenderError::EngineNotFound {
                        binary: self.binary.display().to_string(),
                    }
                } else {
                    RenderError::Io(err)
                }
            })?;

        // Dropping stdin after the write closes the pipe so the engine sees
        // EOF and starts rendering.
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(dot.as_bytes())?;
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            return Err(RenderError::RenderFailed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        Ok(output.stdout)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;

    use super::*;

    /// Write an executable shell script standing in for the engine.
    fn fake_engine(dir: &Path, script: &str) -> PathBuf {
        let path = dir.join("dot");
        std::fs::write(&path, format!("#!/bin/sh\n{script}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn test_missing_engine_maps_to_engine_not_found() {
        let renderer = GraphvizRenderer::new("/nonexistent/graphviz/dot");
        let err = renderer.render("digraph G {}", ImageFormat::Png).unwrap_err();
        assert!(matches!(err, RenderError::EngineNotFound { .. }));
    }

    #[test]
    fn test_successful_render_returns_stdout_bytes() {
        let dir = tempfile::tempdir().unwrap();
        // PNG signature followed by nothing; consumes stdin first so the
        // write side never sees a broken pipe.
        let engine = fake_engine(
            dir.path(),
            "cat > /dev/null\nprintf '\\211PNG\\r\\n\\032\\n'",
        );
        let renderer = GraphvizRenderer::new(engine);
        let bytes = renderer.render("digraph G {}", ImageFormat::Png).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_nonzero_exit_carries_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let engine = fake_engine(
            dir.path(),
            "cat > /dev/null\necho 'syntax error in line 3' >&2\nexit 1",
        );
        let renderer = GraphvizRenderer::new(engine);
        let err = renderer.render("digraph G {}", ImageFormat::Png).unwrap_err();
        match err {
            RenderError::RenderFailed { status, stderr } => {
                assert!(!status.success());
                assert!(stderr.contains("syntax error in line 3"));
            }
            other => panic!("expected RenderFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_format_flags() {
        assert_eq!(ImageFormat::Png.dot_flag(), "-Tpng");
        assert_eq!(ImageFormat::Svg.dot_flag(), "-Tsvg");
        assert_eq!(ImageFormat::default(), ImageFormat::Png);
    }
}

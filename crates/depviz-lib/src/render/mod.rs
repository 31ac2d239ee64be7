//! Diagram rendering through the Graphviz `dot` binary
//!
//! Rendering is best effort: when the renderer is missing or fails, the DOT
//! text is saved next to the requested output so it can be rendered by hand.

use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use thiserror::Error;
use tracing::{debug, warn};

/// Rendering errors (only raised when even the DOT fallback cannot be written)
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to write diagram source: {path}: {source}")]
    SourceWriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Image formats the renderer can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
    Jpg,
    Pdf,
}

impl OutputFormat {
    /// Detect the format from a lowercase file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "svg" => Some(Self::Svg),
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpg),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    /// Graphviz `-T` argument
    pub fn graphviz_type(&self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
            Self::Jpg => "jpg",
            Self::Pdf => "pdf",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.graphviz_type())
    }
}

/// What the renderer ended up producing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The image was written to `path`
    Rendered { path: PathBuf },
    /// Rendering failed; the DOT source was saved to `path` instead
    SourceSaved { path: PathBuf, reason: String },
}

/// Renders DOT text to an image with an external Graphviz binary
#[derive(Debug, Clone)]
pub struct DiagramRenderer {
    dot_command: String,
}

impl DiagramRenderer {
    pub fn new(dot_command: impl Into<String>) -> Self {
        Self {
            dot_command: dot_command.into(),
        }
    }

    /// Run `<dot> -T<format> -o <target>` with the DOT text on stdin
    fn run_dot(&self, dot: &str, target: &Path, format: OutputFormat) -> Result<(), String> {
        let mut child = Command::new(&self.dot_command)
            .arg(format!("-T{}", format.graphviz_type()))
            .arg("-o")
            .arg(target)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| format!("could not run '{}': {}", self.dot_command, e))?;

        // Stdin is closed before waiting; the child is always reaped
        let sent = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(dot.as_bytes()),
            None => Ok(()),
        };

        let output = child
            .wait_with_output()
            .map_err(|e| format!("'{}' did not finish: {}", self.dot_command, e))?;

        if !output.status.success() {
            return Err(format!(
                "'{}' exited with {}: {}",
                self.dot_command,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ));
        }

        sent.map_err(|e| format!("could not send graph to '{}': {}", self.dot_command, e))
    }

    /// Render `dot` to `target`, falling back to saving `<target>.dot`
    pub fn render(
        &self,
        dot: &str,
        target: &Path,
        format: OutputFormat,
    ) -> Result<RenderOutcome, RenderError> {
        debug!(
            command = %self.dot_command,
            target = %target.display(),
            format = %format,
            "Rendering diagram"
        );

        let reason = match self.run_dot(dot, target, format) {
            Ok(()) => {
                return Ok(RenderOutcome::Rendered {
                    path: target.to_path_buf(),
                });
            }
            Err(reason) => reason,
        };

        warn!(reason = %reason, "Diagram renderer unavailable, saving DOT source instead");

        let source_path = target.with_extension("dot");
        std::fs::write(&source_path, dot).map_err(|source| RenderError::SourceWriteFailed {
            path: source_path.clone(),
            source,
        })?;

        Ok(RenderOutcome::SourceSaved {
            path: source_path,
            reason,
        })
    }
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}

use std::process::Stdio;

use async_trait::async_trait;
use thiserror::Error;
use tokio::{io::AsyncWriteExt, process::Command};

use crate::models::domain::ImageFormat;

#[derive(Debug, Error)]
pub enum RenderError {
    /// The renderer rejected the source; carries its diagnostic output.
    #[error("{0}")]
    Syntax(String),

    #[error("renderer produced unusable {format} output: {detail}")]
    InvalidOutput { format: ImageFormat, detail: String },

    #[error("failed to run renderer: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DiagramRenderer: Send + Sync {
    async fn render(&self, source: &str, format: ImageFormat) -> Result<Vec<u8>, RenderError>;
}

/// Renders DOT source by piping it through the Graphviz `dot` binary.
pub struct GraphvizRenderer {
    binary: String,
}

impl GraphvizRenderer {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

#[async_trait]
impl DiagramRenderer for GraphvizRenderer {
    async fn render(&self, source: &str, format: ImageFormat) -> Result<Vec<u8>, RenderError> {
        let mut child = Command::new(&self.binary)
            .arg(format!("-T{}", format))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            // A renderer that bails out early closes its stdin; its exit
            // status carries the real error.
            if let Err(e) = stdin.write_all(source.as_bytes()).await {
                if e.kind() != std::io::ErrorKind::BrokenPipe {
                    return Err(e.into());
                }
            }
        }

        let output = child.wait_with_output().await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(RenderError::Syntax(if stderr.is_empty() {
                format!("{} exited with {}", self.binary, output.status)
            } else {
                stderr
            }));
        }

        Ok(output.stdout)
    }
}

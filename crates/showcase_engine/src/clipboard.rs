use std::io;
use std::process::Stdio;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("no clipboard available: {0}")]
    Unavailable(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("clipboard tool `{tool}` exited with {status}")]
    ToolFailed { tool: String, status: String },
}

/// Platform "write text to the system clipboard" capability.
#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Pipes text into the platform's clipboard command.
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    program: String,
    args: Vec<String>,
}

impl CommandClipboard {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Picks the usual tool for the current platform.
    pub fn detect() -> Self {
        if cfg!(target_os = "macos") {
            Self::new("pbcopy", Vec::new())
        } else if cfg!(target_os = "windows") {
            Self::new("clip", Vec::new())
        } else if std::env::var_os("WAYLAND_DISPLAY").is_some() {
            Self::new("wl-copy", Vec::new())
        } else {
            Self::new("xclip", vec!["-selection".into(), "clipboard".into()])
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

#[async_trait]
impl Clipboard for CommandClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|err| match err.kind() {
                io::ErrorKind::NotFound => {
                    ClipboardError::Unavailable(format!("`{}` not found", self.program))
                }
                _ => ClipboardError::Io(err),
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes()).await?;
            stdin.shutdown().await?;
        }

        let status = child.wait().await?;
        if !status.success() {
            return Err(ClipboardError::ToolFailed {
                tool: self.program.clone(),
                status: status.to_string(),
            });
        }
        Ok(())
    }
}

/// Records writes in memory; for tests and headless runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    writes: Arc<Mutex<Vec<String>>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn last(&self) -> Option<String> {
        self.writes().pop()
    }
}

#[async_trait]
impl Clipboard for MemoryClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(text.to_string());
        Ok(())
    }
}

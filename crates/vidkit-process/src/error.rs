//! Error types for media processing.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for processing operations.
pub type ProcessResult<T> = Result<T, ProcessError>;

/// Errors that can occur during media processing.
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{what} not found: {}", path.display())]
    MissingInput { what: &'static str, path: PathBuf },

    #[error("{tool} not found. Install FFmpeg (https://ffmpeg.org/download.html) and make sure `{tool}` is on your PATH, or set {env}.")]
    ToolNotFound { tool: String, env: &'static str },

    #[error("FFmpeg error: {0}")]
    FfmpegError(String),

    #[error("Process failed with exit code {code}: {stderr}")]
    ProcessFailed { code: i32, stderr: String },

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("No {kind} stream in {}", path.display())]
    NoStream { kind: &'static str, path: PathBuf },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid time range: {0}")]
    InvalidRange(String),

    #[error(transparent)]
    Time(#[from] vidkit_core::Error),
}

impl ProcessError {
    /// Errors caught before any media work starts: missing inputs and
    /// missing tools. Everything else comes from FFmpeg or the filesystem.
    pub fn is_preflight(&self) -> bool {
        matches!(
            self,
            ProcessError::MissingInput { .. } | ProcessError::ToolNotFound { .. }
        )
    }
}

//! Error types for vidkit.

use thiserror::Error;

/// Core error type for vidkit value parsing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid time value: {0}")]
    InvalidTime(String),

    #[error("Invalid position '{0}' (expected center, top, bottom, left or right)")]
    InvalidPosition(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias using vidkit's Error.
pub type Result<T> = std::result::Result<T, Error>;

//! Vidkit Core - Shared types for the vidkit video editing tools.

mod error;
mod types;

pub use error::{Error, Result};
pub use types::*;

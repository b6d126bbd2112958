//! Vidkit Config - Configuration management for the vidkit tools.

mod config;
mod error;
mod paths;

pub use config::*;
pub use error::{ConfigError, ConfigResult};
pub use paths::{AppPaths, CONFIG_ENV};
pub use vidkit_core::{FFMPEG_ENV, FFPROBE_ENV};

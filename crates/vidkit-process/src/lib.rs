//! Vidkit Process - FFmpeg-backed video editing.
//!
//! This crate provides:
//! - Tool discovery and media probing (via `ffmpeg`/`ffprobe`)
//! - Media handles that are released exactly once
//! - The editing operations: trim, GIF, speed GIF, audio, text overlay, concat
//!
//! These rely on FFmpeg being installed on the system.

mod clip;
mod encode;
mod error;
mod ffmpeg;
pub mod filter;
pub mod ops;

pub use clip::{ensure_input, AudioClip, VideoClip};
pub use encode::{EncodeSettings, GifSettings};
pub use error::{ProcessError, ProcessResult};
pub use ffmpeg::{
    check_dependencies, probe, FfmpegCommand, MediaInfo, NoProgress, ProgressSink, ToolStatus,
    Toolchain,
};
pub use ops::*;

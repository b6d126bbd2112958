//! Extract a time range of a video.

use super::report_saved;
use crate::Session;
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use vidkit_process::{ensure_input, trim_video, Subclip, VideoClip};

#[derive(Debug, Clone, Args)]
pub struct TrimArgs {
    /// Input video file
    pub input: PathBuf,

    /// Output video file
    pub output: PathBuf,

    /// Start time (seconds, or any FFmpeg time; negative counts from the end)
    #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
    pub start: String,

    /// End time (default: end of video)
    #[arg(short, long, allow_hyphen_values = true)]
    pub end: Option<String>,
}

pub fn run(session: &mut Session, args: TrimArgs) -> Result<()> {
    ensure_input(&args.input, "Input file")?;

    let tools = session.tools()?;
    let range = Subclip::parse(&args.start, args.end.as_deref())?;

    let clip = VideoClip::open(&tools, &args.input)?;
    let mut progress = session.progress("Trimming");
    let result = trim_video(
        &tools,
        &clip,
        &args.output,
        &range,
        &session.encode_settings(),
        progress.as_mut(),
    );
    clip.close();
    result.context("Failed to trim video")?;

    report_saved("trimmed video", &args.output);
    Ok(())
}

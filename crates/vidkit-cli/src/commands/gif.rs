//! Cut a range of a video into an animated GIF.

use super::report_saved;
use crate::Session;
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use vidkit_process::{create_gif, ensure_input, GifOptions, Subclip, VideoClip};

#[derive(Debug, Clone, Args)]
pub struct CreateGifArgs {
    /// Input video file
    pub input: PathBuf,

    /// Output GIF file
    pub output: PathBuf,

    /// Start time (seconds, or any FFmpeg time; negative counts from the end)
    #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
    pub start: String,

    /// End time (default: end of video)
    #[arg(short, long, allow_hyphen_values = true)]
    pub end: Option<String>,

    /// Frames per second
    #[arg(long, default_value_t = 15)]
    pub fps: u32,

    /// Resize factor (0.5 = half size)
    #[arg(short, long, default_value_t = 1.0)]
    pub resize: f64,
}

pub fn run(session: &mut Session, args: CreateGifArgs) -> Result<()> {
    ensure_input(&args.input, "Input file")?;

    let tools = session.tools()?;
    let range = Subclip::parse(&args.start, args.end.as_deref())?;
    let options = GifOptions {
        fps: args.fps,
        resize: args.resize,
    };

    let clip = VideoClip::open(&tools, &args.input)?;
    let mut progress = session.progress("Creating GIF");
    let result = create_gif(
        &tools,
        &clip,
        &args.output,
        &range,
        &options,
        &session.gif_settings(),
        progress.as_mut(),
    );
    clip.close();
    result.context("Failed to create GIF")?;

    report_saved("GIF", &args.output);
    Ok(())
}

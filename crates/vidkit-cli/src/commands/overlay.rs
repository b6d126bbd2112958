//! Burn a text layer into a video.

use super::report_saved;
use crate::Session;
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use vidkit_core::TextPosition;
use vidkit_process::{ensure_input, overlay_text, TextOverlay, VideoClip};

#[derive(Debug, Clone, Args)]
pub struct TextOverlayArgs {
    /// Input video file
    pub input: PathBuf,

    /// Output video file
    pub output: PathBuf,

    /// Text to display
    #[arg(short, long)]
    pub text: String,

    /// Path to a .ttf font file
    #[arg(short, long)]
    pub font: PathBuf,

    /// Font size in pixels
    #[arg(long, default_value_t = 50)]
    pub font_size: u32,

    /// Text color (name, #RRGGBB, or 0xRRGGBB)
    #[arg(short, long, default_value = "white")]
    pub color: String,

    /// Text position: center, top, bottom, left, right
    #[arg(short, long, default_value = "center")]
    pub position: TextPosition,

    /// When the text appears, in seconds
    #[arg(short, long, default_value_t = 0.0)]
    pub start: f64,

    /// How long the text stays, in seconds (default: rest of the video)
    #[arg(short, long)]
    pub duration: Option<f64>,

    /// Fade in/out duration in seconds
    #[arg(long, default_value_t = 0.5)]
    pub fade: f64,
}

pub fn run(session: &mut Session, args: TextOverlayArgs) -> Result<()> {
    ensure_input(&args.input, "Input file")?;
    ensure_input(&args.font, "Font file")?;

    let tools = session.tools()?;
    let overlay = TextOverlay {
        text: args.text,
        font: args.font,
        font_size: args.font_size,
        color: args.color,
        position: args.position,
        start: args.start,
        duration: args.duration,
        fade: args.fade,
    };

    let video = VideoClip::open(&tools, &args.input)?;
    let mut progress = session.progress("Rendering text");
    let result = overlay_text(
        &tools,
        &video,
        &args.output,
        &overlay,
        &session.encode_settings(),
        progress.as_mut(),
    );
    video.close();
    result.context("Failed to add text overlay")?;

    report_saved("video with text overlay", &args.output);
    Ok(())
}

//! Add or replace a video's audio track.

use super::report_saved;
use crate::Session;
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use vidkit_process::{add_audio, ensure_input, AudioClip, AudioMix, VideoClip};

#[derive(Debug, Clone, Args)]
pub struct AddAudioArgs {
    /// Input video file
    pub video: PathBuf,

    /// Audio file to add
    pub audio: PathBuf,

    /// Output video file
    #[arg(short, long)]
    pub output: PathBuf,

    /// Replace the original audio instead of mixing
    #[arg(short, long)]
    pub replace: bool,

    /// Volume of the original audio (1.0 = unchanged)
    #[arg(long, default_value_t = 1.0)]
    pub video_volume: f64,

    /// Volume of the new audio (1.0 = unchanged)
    #[arg(long, default_value_t = 1.0)]
    pub audio_volume: f64,

    /// When the new audio starts, in seconds
    #[arg(long, default_value_t = 0.0)]
    pub audio_start: f64,
}

pub fn run(session: &mut Session, args: AddAudioArgs) -> Result<()> {
    ensure_input(&args.video, "Video file")?;
    ensure_input(&args.audio, "Audio file")?;

    let tools = session.tools()?;
    let mix = AudioMix {
        replace: args.replace,
        video_volume: args.video_volume,
        audio_volume: args.audio_volume,
        audio_start: args.audio_start,
    };

    let video = VideoClip::open(&tools, &args.video)?;
    let audio = AudioClip::open(&tools, &args.audio)?;

    let mut progress = session.progress("Adding audio");
    let result = add_audio(
        &tools,
        &video,
        &audio,
        &args.output,
        &mix,
        &session.encode_settings(),
        progress.as_mut(),
    );
    video.close();
    audio.close();

    let strategy = result.context("Failed to add audio")?;
    tracing::debug!("Audio written in {} mode", strategy);

    report_saved("video with new audio", &args.output);
    Ok(())
}

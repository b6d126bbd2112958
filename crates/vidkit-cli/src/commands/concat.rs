//! Join videos end to end.

use super::report_saved;
use crate::Session;
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use vidkit_process::{concat_videos, ensure_input, VideoClip};

#[derive(Debug, Clone, Args)]
pub struct ConcatArgs {
    /// Input video files, in order
    #[arg(required = true, num_args = 1..)]
    pub inputs: Vec<PathBuf>,

    /// Output video file
    #[arg(short, long)]
    pub output: PathBuf,

    /// Crossfade duration between clips, in seconds
    #[arg(short, long, default_value_t = 0.0)]
    pub transition: f64,
}

pub fn run(session: &mut Session, args: ConcatArgs) -> Result<()> {
    // Check every path before opening anything
    for input in &args.inputs {
        ensure_input(input, "Input file")?;
    }

    let tools = session.tools()?;
    let clips = args
        .inputs
        .iter()
        .map(|path| VideoClip::open(&tools, path))
        .collect::<Result<Vec<_>, _>>()?;

    let mut progress = session.progress("Concatenating");
    let result = concat_videos(
        &tools,
        &clips,
        &args.output,
        args.transition,
        &session.encode_settings(),
        progress.as_mut(),
    );
    for clip in clips {
        clip.close();
    }

    let duration = result.context("Failed to concatenate videos")?;
    tracing::debug!("Concatenated duration: {:.2}s", duration);

    report_saved("concatenated video", &args.output);
    Ok(())
}

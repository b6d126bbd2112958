//! Animated GIF output.

use super::subclip::Subclip;
use crate::clip::VideoClip;
use crate::encode::GifSettings;
use crate::error::{ProcessError, ProcessResult};
use crate::ffmpeg::{FfmpegCommand, ProgressSink, Toolchain};
use crate::filter::{gif_palette, num, scale_by};
use std::path::Path;
use tracing::info;

/// Frame rate and size of a GIF.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GifOptions {
    pub fps: u32,
    /// Scale factor for both dimensions; 1.0 keeps the source size.
    pub resize: f64,
}

impl Default for GifOptions {
    fn default() -> Self {
        Self {
            fps: 15,
            resize: 1.0,
        }
    }
}

impl GifOptions {
    pub(crate) fn validate(&self) -> ProcessResult<()> {
        if self.fps == 0 {
            return Err(ProcessError::InvalidInput("fps must be at least 1".into()));
        }
        if self.resize.is_nan() || self.resize <= 0.0 {
            return Err(ProcessError::InvalidInput(format!(
                "resize factor must be positive, got {}",
                self.resize
            )));
        }
        Ok(())
    }
}

/// Write `range` of `clip` as an animated GIF. Returns the expected length
/// when it is known.
pub fn create_gif(
    tools: &Toolchain,
    clip: &VideoClip,
    output: &Path,
    range: &Subclip,
    options: &GifOptions,
    settings: &GifSettings,
    sink: &mut dyn ProgressSink,
) -> ProcessResult<Option<f64>> {
    options.validate()?;
    let resolved = range.resolve(clip.duration())?;
    info!("Creating GIF {:?} from {:?}", output, clip.path());

    FfmpegCommand::new()
        .args(resolved.input_args())
        .input(clip.path())
        .video_filter(&gif_filter(None, options, &settings.dither))
        .args(gif_output_args(settings))
        .output(output)
        .run(tools, resolved.expected_duration, sink)?;

    Ok(resolved.expected_duration)
}

/// Filter chain for GIF output, optionally sped up by `speed`.
pub(crate) fn gif_filter(speed: Option<f64>, options: &GifOptions, dither: &str) -> String {
    let mut chain = Vec::new();
    if let Some(speed) = speed {
        chain.push(format!("setpts=PTS/{}", num(speed)));
    }
    chain.push(format!("fps={}", options.fps));
    if options.resize != 1.0 {
        chain.push(scale_by(options.resize, false));
    }
    chain.push(gif_palette(dither));
    chain.join(",")
}

pub(crate) fn gif_output_args(settings: &GifSettings) -> Vec<String> {
    vec![
        "-an".to_string(),
        "-loop".to_string(),
        settings.loop_count.to_string(),
    ]
}

//! Speed a video up to fit a target length, then write it as a GIF.

use super::gif::{gif_filter, gif_output_args, GifOptions};
use crate::clip::VideoClip;
use crate::encode::GifSettings;
use crate::error::{ProcessError, ProcessResult};
use crate::ffmpeg::{FfmpegCommand, ProgressSink, Toolchain};
use std::path::{Path, PathBuf};
use tracing::info;

/// The speed decision for one clip.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedPlan {
    pub original_duration: f64,
    pub target_duration: f64,
    /// `original / target`; above 1.0 the clip is sped up.
    pub speed_factor: f64,
    pub options: GifOptions,
}

impl SpeedPlan {
    pub fn new(
        original_duration: f64,
        target_duration: f64,
        options: GifOptions,
    ) -> ProcessResult<Self> {
        if target_duration.is_nan() || target_duration <= 0.0 {
            return Err(ProcessError::InvalidInput(format!(
                "target duration must be positive, got {}",
                target_duration
            )));
        }
        options.validate()?;

        Ok(Self {
            original_duration,
            target_duration,
            speed_factor: original_duration / target_duration,
            options,
        })
    }

    /// Whether the clip is longer than the target.
    pub fn speeds_up(&self) -> bool {
        self.speed_factor > 1.0
    }

    pub fn resizes(&self) -> bool {
        self.options.resize != 1.0
    }

    /// Length of the GIF in seconds.
    pub fn output_duration(&self) -> f64 {
        if self.speeds_up() {
            self.original_duration / self.speed_factor
        } else {
            self.original_duration
        }
    }

    fn filter(&self, dither: &str) -> String {
        let speed = self.speeds_up().then_some(self.speed_factor);
        gif_filter(speed, &self.options, dither)
    }
}

/// `<dir>/<stem>_<target>s.gif` next to the input.
pub fn default_output_path(input: &Path, target_duration: f64) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let name = format!("{}_{}s.gif", stem, target_duration.trunc() as i64);

    match input.parent() {
        Some(parent) => parent.join(name),
        None => PathBuf::from(name),
    }
}

/// Write `clip` as a GIF according to `plan`.
pub fn write_speed_gif(
    tools: &Toolchain,
    clip: &VideoClip,
    output: &Path,
    plan: &SpeedPlan,
    settings: &GifSettings,
    sink: &mut dyn ProgressSink,
) -> ProcessResult<()> {
    info!(
        "Writing {:?} at {:.2}x speed to {:?}",
        clip.path(),
        plan.speed_factor.max(1.0),
        output
    );

    FfmpegCommand::new()
        .input(clip.path())
        .video_filter(&plan.filter(&settings.dither))
        .args(gif_output_args(settings))
        .output(output)
        .run(tools, Some(plan.output_duration()), sink)
}

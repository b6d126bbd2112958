//! Add or replace a video's audio track.

use crate::clip::{AudioClip, VideoClip};
use crate::encode::EncodeSettings;
use crate::error::{ProcessError, ProcessResult};
use crate::ffmpeg::{FfmpegCommand, MediaInfo, ProgressSink, Toolchain};
use crate::filter::{audio_format, num, FilterGraph};
use std::path::Path;
use tracing::info;

/// How the new track is combined with the video.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioMix {
    /// Drop the original track instead of mixing.
    pub replace: bool,
    /// Gain for the original track.
    pub video_volume: f64,
    /// Gain for the new track.
    pub audio_volume: f64,
    /// Delay before the new track starts, in seconds.
    pub audio_start: f64,
}

impl Default for AudioMix {
    fn default() -> Self {
        Self {
            replace: false,
            video_volume: 1.0,
            audio_volume: 1.0,
            audio_start: 0.0,
        }
    }
}

impl AudioMix {
    fn validate(&self) -> ProcessResult<()> {
        if self.audio_start.is_nan() || self.audio_start < 0.0 {
            return Err(ProcessError::InvalidInput(format!(
                "audio start must be zero or positive, got {}",
                self.audio_start
            )));
        }
        for (name, volume) in [("video", self.video_volume), ("audio", self.audio_volume)] {
            if volume.is_nan() || volume < 0.0 {
                return Err(ProcessError::InvalidInput(format!(
                    "{} volume must be zero or positive, got {}",
                    name, volume
                )));
            }
        }
        Ok(())
    }
}

/// What ended up on the output's audio track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioStrategy {
    /// The new track alone.
    Replace,
    /// Original and new tracks overlaid.
    Mix,
}

impl AudioStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            AudioStrategy::Replace => "replace",
            AudioStrategy::Mix => "mix",
        }
    }
}

impl std::fmt::Display for AudioStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Put `audio` on `video` and write the result to `output`.
pub fn add_audio(
    tools: &Toolchain,
    video: &VideoClip,
    audio: &AudioClip,
    output: &Path,
    mix: &AudioMix,
    settings: &EncodeSettings,
    sink: &mut dyn ProgressSink,
) -> ProcessResult<AudioStrategy> {
    let (strategy, graph) = audio_graph(video.info(), mix)?;
    info!(
        "Adding {:?} to {:?} ({} mode)",
        audio.path(),
        video.path(),
        strategy
    );

    FfmpegCommand::new()
        .input(video.path())
        .input(audio.path())
        .filter_complex(&graph)
        .map("0:v:0")
        .map("[aout]")
        .args(settings.video_args(output))
        .args(settings.audio_args(output))
        .output(output)
        .run(tools, Some(video.duration()), sink)?;

    Ok(strategy)
}

/// Build the audio filtergraph. Input 0 is the video, input 1 the new track;
/// the result is labelled `[aout]` and lasts exactly as long as the video.
fn audio_graph(video: &MediaInfo, mix: &AudioMix) -> ProcessResult<(AudioStrategy, String)> {
    mix.validate()?;

    let strategy = if mix.replace || !video.has_audio() {
        AudioStrategy::Replace
    } else {
        AudioStrategy::Mix
    };

    let mut new_track = vec![audio_format().to_string()];
    if mix.audio_volume != 1.0 {
        new_track.push(format!("volume={}", num(mix.audio_volume)));
    }
    if mix.audio_start > 0.0 {
        let delay_ms = (mix.audio_start * 1000.0).round() as u64;
        new_track.push(format!("adelay={delay_ms}|{delay_ms}"));
    }

    // Pad with silence, then cut, so the track matches the video either way
    let fit = format!("apad,atrim=end={}", num(video.duration));

    let mut graph = FilterGraph::new();
    match strategy {
        AudioStrategy::Replace => {
            graph.chain(format!("[1:a]{},{}[aout]", new_track.join(","), fit));
        }
        AudioStrategy::Mix => {
            let mut original = vec![audio_format().to_string()];
            if mix.video_volume != 1.0 {
                original.push(format!("volume={}", num(mix.video_volume)));
            }
            graph
                .chain(format!("[0:a]{}[orig]", original.join(",")))
                .chain(format!("[1:a]{}[new]", new_track.join(",")))
                .chain(format!(
                    "[orig][new]amix=inputs=2:duration=longest:normalize=0,{}[aout]",
                    fit
                ));
        }
    }

    Ok((strategy, graph.build()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(with_audio: bool) -> MediaInfo {
        MediaInfo {
            duration: 20.0,
            width: 1280,
            height: 720,
            video_codec: Some("h264".into()),
            audio_codec: with_audio.then(|| "aac".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_silent_video_is_treated_as_replace() {
        let mix = AudioMix::default();
        let replace = AudioMix {
            replace: true,
            ..Default::default()
        };

        let silent = audio_graph(&video(false), &mix).unwrap();
        let replaced = audio_graph(&video(false), &replace).unwrap();

        assert_eq!(silent.0, AudioStrategy::Replace);
        assert_eq!(silent, replaced);
        assert!(!silent.1.contains("[0:a]"));
        assert!(silent.1.ends_with("apad,atrim=end=20[aout]"));
    }

    #[test]
    fn test_mix_overlays_both_tracks() {
        let (strategy, graph) = audio_graph(&video(true), &AudioMix::default()).unwrap();
        assert_eq!(strategy, AudioStrategy::Mix);
        assert!(graph.contains("[0:a]"));
        assert!(graph.contains("[1:a]"));
        assert!(graph.contains("amix=inputs=2:duration=longest:normalize=0"));
    }

    #[test]
    fn test_unit_volume_emits_no_scaling() {
        let (_, graph) = audio_graph(&video(true), &AudioMix::default()).unwrap();
        assert!(!graph.contains("volume="));
    }

    #[test]
    fn test_volume_scaling_applied_per_track() {
        let mix = AudioMix {
            video_volume: 0.3,
            audio_volume: 1.5,
            ..Default::default()
        };
        let (_, graph) = audio_graph(&video(true), &mix).unwrap();
        assert!(graph.contains("[0:a]aformat=sample_rates=48000:channel_layouts=stereo,volume=0.3[orig]"));
        assert!(graph.contains("volume=1.5[new]"));

        // The original track's gain is irrelevant once it is replaced
        let replace = AudioMix {
            replace: true,
            ..mix
        };
        let (_, graph) = audio_graph(&video(true), &replace).unwrap();
        assert!(!graph.contains("volume=0.3"));
        assert!(graph.contains("volume=1.5"));
    }

    #[test]
    fn test_audio_start_delays_new_track() {
        let mix = AudioMix {
            audio_start: 2.5,
            ..Default::default()
        };
        let (_, graph) = audio_graph(&video(true), &mix).unwrap();
        assert!(graph.contains("adelay=2500|2500[new]"));

        let (_, graph) = audio_graph(&video(true), &AudioMix::default()).unwrap();
        assert!(!graph.contains("adelay"));
    }

    #[test]
    fn test_negative_values_rejected() {
        let mix = AudioMix {
            audio_start: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            audio_graph(&video(true), &mix),
            Err(ProcessError::InvalidInput(_))
        ));

        let mix = AudioMix {
            audio_volume: -0.5,
            ..Default::default()
        };
        assert!(audio_graph(&video(true), &mix).is_err());
    }
}

//! Join clips end to end, optionally with crossfades.

use crate::clip::VideoClip;
use crate::encode::EncodeSettings;
use crate::error::{ProcessError, ProcessResult};
use crate::ffmpeg::{FfmpegCommand, MediaInfo, ProgressSink, Toolchain};
use crate::filter::{audio_format, num, FilterGraph};
use std::path::Path;
use tracing::info;

const DEFAULT_FPS: f64 = 30.0;

/// A concatenation filtergraph and what it produces.
#[derive(Debug, Clone, PartialEq)]
struct ConcatPlan {
    graph: String,
    /// Output labels to `-map`.
    maps: Vec<String>,
    /// Total output length in seconds.
    duration: f64,
}

/// Concatenate `clips` into `output`. Returns the output length.
///
/// With `transition > 0` and at least two clips, each clip fades out while
/// the next fades in, overlapping by `transition` seconds.
pub fn concat_videos(
    tools: &Toolchain,
    clips: &[VideoClip],
    output: &Path,
    transition: f64,
    settings: &EncodeSettings,
    sink: &mut dyn ProgressSink,
) -> ProcessResult<f64> {
    let infos: Vec<&MediaInfo> = clips.iter().map(|c| c.info()).collect();
    let plan = plan_concat(&infos, transition)?;

    info!(
        "Concatenating {} clips into {:?} ({}s)",
        clips.len(),
        output,
        num(plan.duration)
    );

    let mut cmd = FfmpegCommand::new();
    for clip in clips {
        cmd = cmd.input(clip.path());
    }
    cmd = cmd.filter_complex(&plan.graph);
    for label in &plan.maps {
        cmd = cmd.map(label);
    }

    cmd.args(settings.video_args(output))
        .args(settings.audio_args(output))
        .output(output)
        .run(tools, Some(plan.duration), sink)?;

    Ok(plan.duration)
}

fn plan_concat(clips: &[&MediaInfo], transition: f64) -> ProcessResult<ConcatPlan> {
    let first = clips
        .first()
        .ok_or_else(|| ProcessError::InvalidInput("no clips to concatenate".into()))?;

    if transition.is_nan() || transition < 0.0 {
        return Err(ProcessError::InvalidInput(format!(
            "transition must be zero or positive, got {}",
            transition
        )));
    }

    let crossfade = transition > 0.0 && clips.len() > 1;
    if crossfade {
        if let Some(shortest) = clips.iter().map(|c| c.duration).reduce(f64::min) {
            if transition >= shortest {
                return Err(ProcessError::InvalidInput(format!(
                    "transition of {}s is not shorter than the shortest clip ({}s)",
                    num(transition),
                    num(shortest)
                )));
            }
        }
    }

    // Everything is conformed to the first clip's frame size and rate
    let width = even(first.width);
    let height = even(first.height);
    let fps = num(first.fps.unwrap_or(DEFAULT_FPS));
    let with_audio = clips.iter().any(|c| c.has_audio());

    let mut graph = FilterGraph::new();
    for (i, clip) in clips.iter().enumerate() {
        graph.chain(format!(
            "[{i}:v]scale={width}:{height}:force_original_aspect_ratio=decrease,\
             pad={width}:{height}:(ow-iw)/2:(oh-ih)/2,setsar=1,fps={fps},format=yuv420p,\
             setpts=PTS-STARTPTS[v{i}]"
        ));

        if with_audio {
            let d = num(clip.duration);
            if clip.has_audio() {
                graph.chain(format!(
                    "[{i}:a]{},apad,atrim=end={d},asetpts=PTS-STARTPTS[a{i}]",
                    audio_format()
                ));
            } else {
                graph.chain(format!(
                    "anullsrc=r=48000:cl=stereo,atrim=end={d},asetpts=PTS-STARTPTS[a{i}]"
                ));
            }
        }
    }

    let total: f64 = clips.iter().map(|c| c.duration).sum();
    let duration = if crossfade {
        chain_crossfades(&mut graph, clips, transition, with_audio);
        total - (clips.len() - 1) as f64 * transition
    } else {
        let n = clips.len();
        let inputs: String = (0..n)
            .map(|i| {
                if with_audio {
                    format!("[v{i}][a{i}]")
                } else {
                    format!("[v{i}]")
                }
            })
            .collect();
        let (outputs, a) = if with_audio {
            ("[vout][aout]", 1)
        } else {
            ("[vout]", 0)
        };
        graph.chain(format!("{inputs}concat=n={n}:v=1:a={a}{outputs}"));
        total
    };

    let mut maps = vec!["[vout]".to_string()];
    if with_audio {
        maps.push("[aout]".to_string());
    }

    Ok(ConcatPlan {
        graph: graph.build(),
        maps,
        duration,
    })
}

/// Chain `xfade`/`acrossfade` so each join overlaps by `transition`.
fn chain_crossfades(
    graph: &mut FilterGraph,
    clips: &[&MediaInfo],
    transition: f64,
    with_audio: bool,
) {
    let t = num(transition);
    let last = clips.len() - 1;
    let mut joined = clips[0].duration;
    let mut prev_v = "v0".to_string();
    let mut prev_a = "a0".to_string();

    for (i, clip) in clips.iter().enumerate().skip(1) {
        // The incoming clip starts `transition` before the joined tail ends
        let offset = joined - transition;
        let (out_v, out_a) = if i == last {
            ("vout".to_string(), "aout".to_string())
        } else {
            (format!("vx{i}"), format!("ax{i}"))
        };

        graph.chain(format!(
            "[{prev_v}][v{i}]xfade=transition=fade:duration={t}:offset={}[{out_v}]",
            num(offset)
        ));
        if with_audio {
            graph.chain(format!("[{prev_a}][a{i}]acrossfade=d={t}[{out_a}]"));
        }

        joined = offset + clip.duration;
        prev_v = out_v;
        prev_a = out_a;
    }
}

fn even(n: u32) -> u32 {
    (n / 2 * 2).max(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip(duration: f64, audio: bool) -> MediaInfo {
        MediaInfo {
            duration,
            width: 1280,
            height: 720,
            fps: Some(30.0),
            video_codec: Some("h264".into()),
            audio_codec: audio.then(|| "aac".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_back_to_back_sums_durations() {
        let (a, b, c) = (clip(4.0, true), clip(6.0, true), clip(2.5, true));
        let plan = plan_concat(&[&a, &b, &c], 0.0).unwrap();

        assert!((plan.duration - 12.5).abs() < 1e-9);
        assert!(plan
            .graph
            .contains("[v0][a0][v1][a1][v2][a2]concat=n=3:v=1:a=1[vout][aout]"));
        assert!(!plan.graph.contains("xfade"));
        assert_eq!(plan.maps, vec!["[vout]", "[aout]"]);
    }

    #[test]
    fn test_crossfade_overlaps_each_join() {
        let (a, b, c) = (clip(4.0, true), clip(6.0, true), clip(5.0, true));
        let plan = plan_concat(&[&a, &b, &c], 1.0).unwrap();

        // 15s of material minus two 1s overlaps
        assert!((plan.duration - 13.0).abs() < 1e-9);
        assert!(plan
            .graph
            .contains("[v0][v1]xfade=transition=fade:duration=1:offset=3[vx1]"));
        assert!(plan
            .graph
            .contains("[vx1][v2]xfade=transition=fade:duration=1:offset=8[vout]"));
        assert!(plan.graph.contains("[a0][a1]acrossfade=d=1[ax1]"));
        assert!(plan.graph.contains("[ax1][a2]acrossfade=d=1[aout]"));
        assert!(!plan.graph.contains("concat="));
    }

    #[test]
    fn test_single_clip_ignores_transition() {
        let a = clip(4.0, true);
        let plan = plan_concat(&[&a], 1.5).unwrap();
        assert!((plan.duration - 4.0).abs() < 1e-9);
        assert!(plan.graph.contains("concat=n=1"));
        assert!(!plan.graph.contains("xfade"));
    }

    #[test]
    fn test_silent_clips_get_generated_audio() {
        let (a, b) = (clip(3.0, true), clip(2.0, false));
        let plan = plan_concat(&[&a, &b], 0.0).unwrap();
        assert!(plan
            .graph
            .contains("anullsrc=r=48000:cl=stereo,atrim=end=2,asetpts=PTS-STARTPTS[a1]"));
        assert!(!plan.graph.contains("[1:a]"));
    }

    #[test]
    fn test_all_silent_clips_have_no_audio_output() {
        let (a, b) = (clip(3.0, false), clip(2.0, false));
        let plan = plan_concat(&[&a, &b], 0.0).unwrap();
        assert!(plan.graph.contains("[v0][v1]concat=n=2:v=1:a=0[vout]"));
        assert_eq!(plan.maps, vec!["[vout]"]);
        assert!(!plan.graph.contains("anullsrc"));
    }

    #[test]
    fn test_clips_conform_to_first() {
        let a = MediaInfo {
            width: 641,
            height: 359,
            fps: Some(25.0),
            ..clip(3.0, false)
        };
        let b = clip(3.0, false);
        let plan = plan_concat(&[&a, &b], 0.0).unwrap();
        assert!(plan.graph.contains("[1:v]scale=640:358:force_original_aspect_ratio=decrease"));
        assert!(plan.graph.contains("fps=25"));
    }

    #[test]
    fn test_invalid_requests() {
        assert!(plan_concat(&[], 0.0).is_err());

        let (a, b) = (clip(3.0, true), clip(1.0, true));
        assert!(matches!(
            plan_concat(&[&a, &b], 1.0),
            Err(ProcessError::InvalidInput(_))
        ));
        assert!(plan_concat(&[&a, &b], -0.5).is_err());
    }
}

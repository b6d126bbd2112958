//! Cut a sub-range out of a video.

use super::subclip::{ResolvedRange, Subclip};
use crate::clip::VideoClip;
use crate::encode::EncodeSettings;
use crate::error::ProcessResult;
use crate::ffmpeg::{FfmpegCommand, ProgressSink, Toolchain};
use std::path::Path;
use tracing::info;

/// Write `range` of `clip` to `output` at the source resolution and frame
/// rate. Returns the expected output length when it is known.
pub fn trim_video(
    tools: &Toolchain,
    clip: &VideoClip,
    output: &Path,
    range: &Subclip,
    settings: &EncodeSettings,
    sink: &mut dyn ProgressSink,
) -> ProcessResult<Option<f64>> {
    let resolved = range.resolve(clip.duration())?;
    info!("Trimming {:?} -> {:?}", clip.path(), output);

    trim_command(clip.path(), output, &resolved, settings).run(
        tools,
        resolved.expected_duration,
        sink,
    )?;

    Ok(resolved.expected_duration)
}

fn trim_command(
    input: &Path,
    output: &Path,
    range: &ResolvedRange,
    settings: &EncodeSettings,
) -> FfmpegCommand {
    FfmpegCommand::new()
        .args(range.input_args())
        .input(input)
        .map("0:v:0")
        .map("0:a:0?")
        .args(settings.video_args(output))
        .args(settings.audio_args(output))
        .output(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_command_seeks_before_input() {
        let range = Subclip::parse("5", Some("15")).unwrap().resolve(30.0).unwrap();
        let args = trim_command(
            Path::new("in.mp4"),
            Path::new("out.mp4"),
            &range,
            &EncodeSettings::default(),
        )
        .args_lossy();

        let ss = args.iter().position(|a| a == "-ss").unwrap();
        let to = args.iter().position(|a| a == "-to").unwrap();
        let input = args.iter().position(|a| a == "-i").unwrap();
        assert!(ss < input && to < input);
        assert_eq!(args[ss + 1], "5");
        assert_eq!(args[to + 1], "15");
        assert!(args.contains(&"0:a:0?".to_string()));
        assert_eq!(args.last().unwrap(), "out.mp4");
    }

    #[test]
    fn test_trim_to_end_has_no_stop() {
        let range = Subclip::parse("5", None).unwrap().resolve(30.0).unwrap();
        let args = trim_command(
            Path::new("in.mp4"),
            Path::new("out.mp4"),
            &range,
            &EncodeSettings::default(),
        )
        .args_lossy();

        assert!(!args.contains(&"-to".to_string()));
        assert_eq!(range.expected_duration, Some(25.0));
    }
}

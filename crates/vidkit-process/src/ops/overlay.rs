//! Burn a text layer into a video.

use crate::clip::VideoClip;
use crate::encode::EncodeSettings;
use crate::error::{ProcessError, ProcessResult};
use crate::ffmpeg::{FfmpegCommand, ProgressSink, Toolchain};
use crate::filter::{escape_value, num};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use vidkit_core::TextPosition;

/// A text layer and its timing.
#[derive(Debug, Clone, PartialEq)]
pub struct TextOverlay {
    pub text: String,
    /// TrueType/OpenType font file.
    pub font: PathBuf,
    pub font_size: u32,
    /// Any FFmpeg color: a name, `#RRGGBB`, or `0xRRGGBB[AA]`.
    pub color: String,
    pub position: TextPosition,
    /// Seconds into the video where the text appears.
    pub start: f64,
    /// How long the text stays; `None` (or 0) keeps it to the end.
    pub duration: Option<f64>,
    /// Fade in/out length; 0 disables fading.
    pub fade: f64,
}

impl TextOverlay {
    /// The `[start, end)` window of the layer on a video of `video_duration`.
    pub fn window(&self, video_duration: f64) -> ProcessResult<(f64, f64)> {
        if self.start.is_nan() || self.start < 0.0 {
            return Err(ProcessError::InvalidInput(format!(
                "text start must be zero or positive, got {}",
                self.start
            )));
        }
        if self.fade.is_nan() || self.fade < 0.0 {
            return Err(ProcessError::InvalidInput(format!(
                "fade must be zero or positive, got {}",
                self.fade
            )));
        }
        if self.font_size == 0 {
            return Err(ProcessError::InvalidInput("font size must be at least 1".into()));
        }

        let duration = self
            .duration
            .filter(|d| *d != 0.0)
            .unwrap_or(video_duration - self.start);

        if duration.is_nan() || duration <= 0.0 {
            return Err(ProcessError::InvalidRange(format!(
                "text starting at {}s has no time left in a {}s video",
                num(self.start),
                num(video_duration)
            )));
        }

        Ok((self.start, self.start + duration))
    }
}

/// Composite `overlay` over `video` and write the result to `output`.
pub fn overlay_text(
    tools: &Toolchain,
    video: &VideoClip,
    output: &Path,
    overlay: &TextOverlay,
    settings: &EncodeSettings,
    sink: &mut dyn ProgressSink,
) -> ProcessResult<()> {
    let window = overlay.window(video.duration())?;

    // drawtext reads the text from a file so it needs no escaping; the
    // directory is removed when `scratch` drops, on success or failure
    let scratch = tempfile::Builder::new().prefix("vidkit-text").tempdir()?;
    let textfile = scratch.path().join("overlay.txt");
    std::fs::write(&textfile, &overlay.text)?;
    debug!("Wrote overlay text to {:?}", textfile);

    info!(
        "Overlaying text on {:?} from {}s to {}s",
        video.path(),
        num(window.0),
        num(window.1)
    );

    FfmpegCommand::new()
        .input(video.path())
        .video_filter(&drawtext_filter(overlay, &textfile, window))
        .map("0:v:0")
        .map("0:a:0?")
        .args(settings.video_args(output))
        .args(settings.audio_args(output))
        .output(output)
        .run(tools, Some(video.duration()), sink)
}

/// x/y expressions placing the text box.
fn placement(position: TextPosition) -> (&'static str, &'static str) {
    const CENTER_X: &str = "(w-text_w)/2";
    const CENTER_Y: &str = "(h-text_h)/2";

    match position {
        TextPosition::Center => (CENTER_X, CENTER_Y),
        TextPosition::Top => (CENTER_X, "0"),
        TextPosition::Bottom => (CENTER_X, "h-text_h"),
        TextPosition::Left => ("0", CENTER_Y),
        TextPosition::Right => ("w-text_w", CENTER_Y),
    }
}

fn drawtext_filter(overlay: &TextOverlay, textfile: &Path, (start, end): (f64, f64)) -> String {
    let (x, y) = placement(overlay.position);
    let (s, e) = (num(start), num(end));

    let mut options = vec![
        format!("fontfile={}", escape_value(&overlay.font.to_string_lossy())),
        format!("textfile={}", escape_value(&textfile.to_string_lossy())),
        "expansion=none".to_string(),
        format!("fontsize={}", overlay.font_size),
        format!("fontcolor={}", escape_value(&overlay.color)),
        format!("x={}", escape_value(x)),
        format!("y={}", escape_value(y)),
        format!("enable={}", escape_value(&format!("between(t,{s},{e})"))),
    ];

    if overlay.fade > 0.0 {
        // Ramps up over the first `fade` seconds and down over the last
        let f = num(overlay.fade);
        let alpha = format!("clip(min((t-{s})/{f},({e}-t)/{f}),0,1)");
        options.push(format!("alpha={}", escape_value(&alpha)));
    }

    format!("drawtext={}", options.join(":"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overlay() -> TextOverlay {
        TextOverlay {
            text: "Hello: world".to_string(),
            font: PathBuf::from("/fonts/Inter.ttf"),
            font_size: 50,
            color: "white".to_string(),
            position: TextPosition::Center,
            start: 0.0,
            duration: None,
            fade: 0.5,
        }
    }

    #[test]
    fn test_window_defaults_to_rest_of_video() {
        let mut o = overlay();
        o.start = 2.0;
        assert_eq!(o.window(10.0).unwrap(), (2.0, 10.0));

        o.duration = Some(3.0);
        assert_eq!(o.window(10.0).unwrap(), (2.0, 5.0));

        // Zero duration behaves like no duration
        o.duration = Some(0.0);
        assert_eq!(o.window(10.0).unwrap(), (2.0, 10.0));
    }

    #[test]
    fn test_window_rejects_start_past_end() {
        let mut o = overlay();
        o.start = 12.0;
        assert!(matches!(o.window(10.0), Err(ProcessError::InvalidRange(_))));
    }

    #[test]
    fn test_drawtext_with_fade() {
        let o = overlay();
        let filter = drawtext_filter(&o, Path::new("/tmp/t.txt"), (1.0, 4.0));

        assert!(filter.starts_with("drawtext=fontfile=/fonts/Inter.ttf:textfile=/tmp/t.txt"));
        assert!(filter.contains(":expansion=none:"));
        assert!(filter.contains(":fontsize=50:fontcolor=white:"));
        assert!(filter.contains(":enable=between(t\\,1\\,4)"));
        assert!(filter.contains(":alpha=clip(min((t-1)/0.5\\,(4-t)/0.5)\\,0\\,1)"));
        // The text itself never appears in the graph
        assert!(!filter.contains("Hello"));
    }

    #[test]
    fn test_drawtext_without_fade() {
        let mut o = overlay();
        o.fade = 0.0;
        let filter = drawtext_filter(&o, Path::new("/tmp/t.txt"), (0.0, 4.0));
        assert!(!filter.contains("alpha="));
    }

    #[test]
    fn test_positions() {
        assert_eq!(placement(TextPosition::Center), ("(w-text_w)/2", "(h-text_h)/2"));
        assert_eq!(placement(TextPosition::Top), ("(w-text_w)/2", "0"));
        assert_eq!(placement(TextPosition::Bottom), ("(w-text_w)/2", "h-text_h"));
        assert_eq!(placement(TextPosition::Left), ("0", "(h-text_h)/2"));
        assert_eq!(placement(TextPosition::Right), ("w-text_w", "(h-text_h)/2"));

        let mut o = overlay();
        o.position = TextPosition::Bottom;
        let filter = drawtext_filter(&o, Path::new("/tmp/t.txt"), (0.0, 4.0));
        assert!(filter.contains(":y=h-text_h:"));
    }

    #[test]
    fn test_invalid_overlay_values() {
        let mut o = overlay();
        o.font_size = 0;
        assert!(o.window(10.0).is_err());

        let mut o = overlay();
        o.fade = -1.0;
        assert!(o.window(10.0).is_err());
    }
}

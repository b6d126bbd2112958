//! Output encoding settings.

use std::path::Path;

/// How video files are encoded.
#[derive(Debug, Clone)]
pub struct EncodeSettings {
    /// Overrides the container default when set.
    pub video_codec: Option<String>,
    /// Overrides the container default when set.
    pub audio_codec: Option<String>,
    pub preset: String,
    pub crf: u8,
    pub pixel_format: String,
    pub audio_bitrate: String,
}

impl Default for EncodeSettings {
    fn default() -> Self {
        Self {
            video_codec: None,
            audio_codec: None,
            preset: "medium".to_string(),
            crf: 23,
            pixel_format: "yuv420p".to_string(),
            audio_bitrate: "192k".to_string(),
        }
    }
}

impl EncodeSettings {
    /// Video and audio codec for an output file.
    pub fn codecs_for(&self, output: &Path) -> (String, String) {
        let ext = output
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        let (video, audio) = match ext.as_str() {
            "webm" => ("libvpx-vp9", "libopus"),
            "ogv" => ("libtheora", "libvorbis"),
            _ => ("libx264", "aac"),
        };

        (
            self.video_codec.clone().unwrap_or_else(|| video.to_string()),
            self.audio_codec.clone().unwrap_or_else(|| audio.to_string()),
        )
    }

    /// `-c:v` and quality flags.
    pub fn video_args(&self, output: &Path) -> Vec<String> {
        let (codec, _) = self.codecs_for(output);
        let mut args = vec!["-c:v".to_string(), codec.clone()];

        match codec.as_str() {
            "libx264" | "libx265" => {
                args.extend([
                    "-preset".to_string(),
                    self.preset.clone(),
                    "-crf".to_string(),
                    self.crf.to_string(),
                ]);
            }
            "libvpx-vp9" => {
                args.extend([
                    "-crf".to_string(),
                    self.crf.to_string(),
                    "-b:v".to_string(),
                    "0".to_string(),
                ]);
            }
            _ => {}
        }

        args.extend(["-pix_fmt".to_string(), self.pixel_format.clone()]);
        args
    }

    /// `-c:a` and bitrate flags.
    pub fn audio_args(&self, output: &Path) -> Vec<String> {
        let (_, codec) = self.codecs_for(output);
        vec![
            "-c:a".to_string(),
            codec,
            "-b:a".to_string(),
            self.audio_bitrate.clone(),
        ]
    }
}

/// How animated GIFs are written.
#[derive(Debug, Clone)]
pub struct GifSettings {
    /// 0 loops forever, -1 plays once.
    pub loop_count: i32,
    pub dither: String,
}

impl Default for GifSettings {
    fn default() -> Self {
        Self {
            loop_count: 0,
            dither: "sierra2_4a".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codecs_by_container() {
        let settings = EncodeSettings::default();
        assert_eq!(
            settings.codecs_for(Path::new("out.mp4")),
            ("libx264".to_string(), "aac".to_string())
        );
        assert_eq!(
            settings.codecs_for(Path::new("out.WEBM")),
            ("libvpx-vp9".to_string(), "libopus".to_string())
        );
        assert_eq!(
            settings.codecs_for(Path::new("out.ogv")),
            ("libtheora".to_string(), "libvorbis".to_string())
        );
        assert_eq!(settings.codecs_for(Path::new("noext")).0, "libx264");
    }

    #[test]
    fn test_codec_override() {
        let settings = EncodeSettings {
            video_codec: Some("mpeg4".into()),
            ..Default::default()
        };
        let args = settings.video_args(Path::new("out.webm"));
        assert_eq!(args, vec!["-c:v", "mpeg4", "-pix_fmt", "yuv420p"]);
        assert_eq!(settings.audio_args(Path::new("out.webm"))[1], "libopus");
    }

    #[test]
    fn test_x264_quality_flags() {
        let args = EncodeSettings::default().video_args(Path::new("out.mp4"));
        assert_eq!(
            args,
            vec!["-c:v", "libx264", "-preset", "medium", "-crf", "23", "-pix_fmt", "yuv420p"]
        );
    }
}

//! Configuration structures and loading.

use crate::error::{ConfigError, ConfigResult};
use crate::paths::AppPaths;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;
use vidkit_core::{FFMPEG_ENV, FFPROBE_ENV};

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tools: ToolsConfig,

    #[serde(default)]
    pub encoding: EncodingConfig,

    #[serde(default)]
    pub gif: GifConfig,

    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    /// Load configuration from the default location, then apply
    /// environment overrides.
    pub fn load() -> ConfigResult<Self> {
        let paths = AppPaths::resolve().ok_or(ConfigError::NoConfigDir)?;
        let mut config = Self::load_from(&paths.config_file)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load configuration from a specific path.
    ///
    /// A missing file yields the defaults.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            debug!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Apply `VIDKIT_FFMPEG` / `VIDKIT_FFPROBE` style overrides.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(ffmpeg) = lookup(FFMPEG_ENV).filter(|v| !v.is_empty()) {
            self.tools.ffmpeg = ffmpeg;
        }
        if let Some(ffprobe) = lookup(FFPROBE_ENV).filter(|v| !v.is_empty()) {
            self.tools.ffprobe = ffprobe;
        }
    }

    /// Reject values FFmpeg would choke on later.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.tools.ffmpeg.trim().is_empty() {
            return Err(ConfigError::Invalid("tools.ffmpeg must not be empty".into()));
        }
        if self.tools.ffprobe.trim().is_empty() {
            return Err(ConfigError::Invalid("tools.ffprobe must not be empty".into()));
        }
        if self.encoding.crf > 63 {
            return Err(ConfigError::Invalid(format!(
                "encoding.crf must be between 0 and 63, got {}",
                self.encoding.crf
            )));
        }
        if self.gif.loop_count < -1 {
            return Err(ConfigError::Invalid(format!(
                "gif.loop_count must be -1 (no loop), 0 (forever) or a positive count, got {}",
                self.gif.loop_count
            )));
        }
        Ok(())
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        let contents = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Create a default config file with comments.
    pub fn create_default_file(path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, Self::default_config_string())?;
        Ok(())
    }

    /// Generate a default config file with helpful comments.
    pub fn default_config_string() -> String {
        r#"# vidkit configuration

[tools]
# FFmpeg and FFprobe binaries (name on PATH or absolute path).
# VIDKIT_FFMPEG / VIDKIT_FFPROBE override these.
ffmpeg = "ffmpeg"
ffprobe = "ffprobe"

[encoding]
# Codec overrides. Leave unset to pick by container:
#   .webm -> libvpx-vp9 / libopus, .ogv -> libtheora / libvorbis,
#   everything else -> libx264 / aac
# video_codec = "libx264"
# audio_codec = "aac"

# x264/x265 preset and quality
preset = "medium"
crf = 23

pixel_format = "yuv420p"
audio_bitrate = "192k"

[gif]
# 0 loops forever, -1 plays once
loop_count = 0

# paletteuse dither: bayer, heckbert, floyd_steinberg, sierra2, sierra2_4a, none
dither = "sierra2_4a"

[ui]
# Colored status output
color = true

# Progress bar while FFmpeg encodes
progress = true
"#
        .to_string()
    }
}

/// External binaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub ffmpeg: String,
    pub ffprobe: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            ffmpeg: "ffmpeg".to_string(),
            ffprobe: "ffprobe".to_string(),
        }
    }
}

/// Output encoding settings for video files.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodingConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_codec: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_codec: Option<String>,
    pub preset: String,
    pub crf: u8,
    pub pixel_format: String,
    pub audio_bitrate: String,
}

impl Default for EncodingConfig {
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

/// Animated GIF settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GifConfig {
    pub loop_count: i32,
    pub dither: String,
}

impl Default for GifConfig {
    fn default() -> Self {
        Self {
            loop_count: 0,
            dither: "sierra2_4a".to_string(),
        }
    }
}

/// UI/Display settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub color: bool,
    pub progress: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            color: true,
            progress: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.tools.ffmpeg, "ffmpeg");
        assert_eq!(config.tools.ffprobe, "ffprobe");
        assert_eq!(config.encoding.crf, 23);
        assert!(config.encoding.video_codec.is_none());
        assert_eq!(config.gif.loop_count, 0);
        assert!(config.ui.progress);
    }

    #[test]
    fn test_default_config_string_parses() {
        let config: Config = toml::from_str(&Config::default_config_string()).unwrap();
        assert_eq!(config.encoding.preset, "medium");
        assert_eq!(config.gif.dither, "sierra2_4a");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
            [encoding]
            video_codec = "mpeg4"
            crf = 30
            "#
        )
        .unwrap();

        let config = Config::load_from(temp_file.path()).unwrap();

        assert_eq!(config.encoding.video_codec.as_deref(), Some("mpeg4"));
        assert_eq!(config.encoding.crf, 30);
        // Defaults should still work
        assert_eq!(config.encoding.preset, "medium");
        assert_eq!(config.tools.ffmpeg, "ffmpeg");
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.tools.ffmpeg, "ffmpeg");
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[encoding]\ncrf = 99").unwrap();

        let err = Config::load_from(temp_file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_parse_error_names_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[encoding\ncrf = ").unwrap();

        let err = Config::load_from(temp_file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err
            .to_string()
            .contains(&temp_file.path().display().to_string()));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [(FFMPEG_ENV, "/opt/ffmpeg/bin/ffmpeg"), (FFPROBE_ENV, "")]
            .into_iter()
            .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.tools.ffmpeg, "/opt/ffmpeg/bin/ffmpeg");
        // Empty values are ignored
        assert_eq!(config.tools.ffprobe, "ffprobe");
    }

    #[test]
    fn test_save_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.gif.dither = "bayer".to_string();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.gif.dither, "bayer");
    }
}

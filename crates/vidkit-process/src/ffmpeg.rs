//! FFmpeg integration: tool discovery, probing, and running encodes.

use crate::error::{ProcessError, ProcessResult};
use serde::Deserialize;
use std::collections::HashMap;
use std::ffi::{OsStr, OsString};
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;
use vidkit_core::{FFMPEG_ENV, FFPROBE_ENV};

/// Resolved paths to the external binaries.
#[derive(Debug, Clone)]
pub struct Toolchain {
    pub ffmpeg: PathBuf,
    pub ffprobe: PathBuf,
}

impl Toolchain {
    /// Locate `ffmpeg` and `ffprobe` by name or path.
    pub fn locate(ffmpeg: &str, ffprobe: &str) -> ProcessResult<Self> {
        let ffmpeg_path = which::which(ffmpeg).map_err(|_| ProcessError::ToolNotFound {
            tool: ffmpeg.to_string(),
            env: FFMPEG_ENV,
        })?;
        let ffprobe_path = which::which(ffprobe).map_err(|_| ProcessError::ToolNotFound {
            tool: ffprobe.to_string(),
            env: FFPROBE_ENV,
        })?;

        debug!("Using ffmpeg at {:?}, ffprobe at {:?}", ffmpeg_path, ffprobe_path);

        Ok(Self {
            ffmpeg: ffmpeg_path,
            ffprobe: ffprobe_path,
        })
    }
}

/// Availability of one external tool.
#[derive(Debug, Clone)]
pub struct ToolStatus {
    pub name: String,
    pub path: Option<PathBuf>,
    pub version: Option<String>,
}

impl ToolStatus {
    pub fn is_available(&self) -> bool {
        self.path.is_some()
    }
}

/// Check whether the given tools are installed, with their versions.
pub fn check_dependencies(ffmpeg: &str, ffprobe: &str) -> Vec<ToolStatus> {
    [ffmpeg, ffprobe]
        .into_iter()
        .map(|name| {
            let path = which::which(name).ok();
            let version = path.as_deref().and_then(tool_version);
            ToolStatus {
                name: name.to_string(),
                path,
                version,
            }
        })
        .collect()
}

/// First line of `<tool> -version`, e.g. `ffmpeg version 6.1.1 ...`.
fn tool_version(path: &Path) -> Option<String> {
    let output = Command::new(path).arg("-version").output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .next()
        .map(|line| line.trim().to_string())
}

/// Information about a media file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaInfo {
    /// Duration in seconds.
    pub duration: f64,
    /// Width in pixels (0 without a video stream).
    pub width: u32,
    /// Height in pixels (0 without a video stream).
    pub height: u32,
    /// Frame rate.
    pub fps: Option<f64>,
    /// Video codec.
    pub video_codec: Option<String>,
    /// Audio codec.
    pub audio_codec: Option<String>,
    /// Audio sample rate in Hz.
    pub sample_rate: Option<u32>,
    /// Audio channel count.
    pub channels: Option<u32>,
    /// Bitrate in bits per second.
    pub bitrate: Option<u64>,
}

impl MediaInfo {
    pub fn has_video(&self) -> bool {
        self.video_codec.is_some()
    }

    pub fn has_audio(&self) -> bool {
        self.audio_codec.is_some()
    }
}

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    format: FfprobeFormat,
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    duration: Option<String>,
    bit_rate: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    codec_type: String,
    codec_name: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    r_frame_rate: Option<String>,
    avg_frame_rate: Option<String>,
    sample_rate: Option<String>,
    channels: Option<u32>,
    duration: Option<String>,
    #[serde(default)]
    disposition: HashMap<String, i64>,
}

impl FfprobeStream {
    /// Cover art in audio files shows up as a one-frame video stream.
    fn is_attached_picture(&self) -> bool {
        self.disposition.get("attached_pic").copied().unwrap_or(0) != 0
    }
}

/// Get information about a media file.
pub fn probe(tools: &Toolchain, path: &Path) -> ProcessResult<MediaInfo> {
    if !path.exists() {
        return Err(ProcessError::MissingInput {
            what: "Input file",
            path: path.to_path_buf(),
        });
    }

    let output = Command::new(&tools.ffprobe)
        .args([
            "-v", "error",
            "-print_format", "json",
            "-show_format",
            "-show_streams",
        ])
        .arg(path)
        .stdin(Stdio::null())
        .output()?;

    if !output.status.success() {
        return Err(ProcessError::FfmpegError(
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        ));
    }

    let info = parse_probe_output(&String::from_utf8_lossy(&output.stdout))?;
    debug!(
        "Probed {:?}: {:.3}s {}x{} video={:?} audio={:?}",
        path, info.duration, info.width, info.height, info.video_codec, info.audio_codec
    );
    Ok(info)
}

/// Parse the JSON printed by `ffprobe -show_format -show_streams`.
pub(crate) fn parse_probe_output(json: &str) -> ProcessResult<MediaInfo> {
    let probe: FfprobeOutput = serde_json::from_str(json)
        .map_err(|e| ProcessError::ParseError(format!("Failed to parse ffprobe output: {}", e)))?;

    let video_stream = probe
        .streams
        .iter()
        .find(|s| s.codec_type == "video" && !s.is_attached_picture());
    let audio_stream = probe.streams.iter().find(|s| s.codec_type == "audio");

    // Some containers only report per-stream durations
    let duration = probe
        .format
        .duration
        .as_deref()
        .and_then(|d| d.parse::<f64>().ok())
        .or_else(|| {
            probe
                .streams
                .iter()
                .filter_map(|s| s.duration.as_deref()?.parse::<f64>().ok())
                .reduce(f64::max)
        })
        .unwrap_or(0.0);

    let (width, height) = video_stream
        .map(|s| (s.width.unwrap_or(0), s.height.unwrap_or(0)))
        .unwrap_or((0, 0));

    let fps = video_stream.and_then(|s| {
        s.avg_frame_rate
            .as_deref()
            .and_then(parse_frame_rate)
            .or_else(|| s.r_frame_rate.as_deref().and_then(parse_frame_rate))
    });

    Ok(MediaInfo {
        duration,
        width,
        height,
        fps,
        video_codec: video_stream.and_then(|s| s.codec_name.clone()),
        audio_codec: audio_stream.and_then(|s| s.codec_name.clone()),
        sample_rate: audio_stream
            .and_then(|s| s.sample_rate.as_deref())
            .and_then(|r| r.parse().ok()),
        channels: audio_stream.and_then(|s| s.channels),
        bitrate: probe.format.bit_rate.as_deref().and_then(|b| b.parse().ok()),
    })
}

/// Parse `30000/1001` or `25` into frames per second.
fn parse_frame_rate(rate: &str) -> Option<f64> {
    let fps = match rate.split_once('/') {
        Some((num, den)) => {
            let num: f64 = num.parse().ok()?;
            let den: f64 = den.parse().ok()?;
            if den > 0.0 {
                num / den
            } else {
                return None;
            }
        }
        None => rate.parse().ok()?,
    };

    (fps > 0.0).then_some(fps)
}

/// Receives encode progress from a running FFmpeg.
pub trait ProgressSink {
    /// Called once before encoding with the expected output length.
    fn start(&mut self, _total_seconds: Option<f64>) {}

    /// Called with the output position reached so far.
    fn update(&mut self, _seconds: f64) {}

    /// Called once after FFmpeg exits.
    fn finish(&mut self) {}
}

/// A sink that ignores progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {}

/// One parsed line of `-progress` output.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ProgressEvent {
    Position(f64),
    End,
}

/// Parse a `key=value` line from `-progress pipe:1`.
pub(crate) fn parse_progress_line(line: &str) -> Option<ProgressEvent> {
    let (key, value) = line.trim().split_once('=')?;
    match key {
        "out_time_us" => value
            .parse::<i64>()
            .ok()
            .map(|us| ProgressEvent::Position(us.max(0) as f64 / 1_000_000.0)),
        "progress" if value == "end" => Some(ProgressEvent::End),
        _ => None,
    }
}

/// An ffmpeg invocation, built up argument by argument.
#[derive(Debug, Clone)]
pub struct FfmpegCommand {
    args: Vec<OsString>,
}

impl Default for FfmpegCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl FfmpegCommand {
    /// Start a command that overwrites its output.
    pub fn new() -> Self {
        Self {
            args: vec!["-hide_banner".into(), "-nostdin".into(), "-y".into()],
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    /// Add an input file.
    pub fn input(self, path: &Path) -> Self {
        self.arg("-i").arg(path)
    }

    pub fn filter_complex(self, graph: &str) -> Self {
        self.arg("-filter_complex").arg(graph)
    }

    pub fn video_filter(self, graph: &str) -> Self {
        self.arg("-vf").arg(graph)
    }

    pub fn map(self, spec: &str) -> Self {
        self.arg("-map").arg(spec)
    }

    pub fn output(self, path: &Path) -> Self {
        self.arg(path)
    }

    /// Arguments as lossy strings, for logging and inspection.
    pub fn args_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    /// Run ffmpeg to completion, reporting progress to `sink`.
    ///
    /// stderr goes to an anonymous temp file so a chatty ffmpeg can never
    /// block on a full pipe while stdout is being read.
    pub fn run(
        &self,
        tools: &Toolchain,
        expected_duration: Option<f64>,
        sink: &mut dyn ProgressSink,
    ) -> ProcessResult<()> {
        debug!("Running {:?} {}", tools.ffmpeg, self.args_lossy().join(" "));

        let mut stderr_file = tempfile::tempfile()?;

        let mut child = Command::new(&tools.ffmpeg)
            .args(["-progress", "pipe:1", "-nostats", "-loglevel", "error"])
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::from(stderr_file.try_clone()?))
            .spawn()?;

        sink.start(expected_duration);

        if let Some(stdout) = child.stdout.take() {
            for line in BufReader::new(stdout).lines() {
                let line = line?;
                match parse_progress_line(&line) {
                    Some(ProgressEvent::Position(seconds)) => sink.update(seconds),
                    Some(ProgressEvent::End) => break,
                    None => {}
                }
            }
        }

        let status = child.wait()?;
        sink.finish();

        if !status.success() {
            let mut stderr = String::new();
            stderr_file.seek(SeekFrom::Start(0))?;
            stderr_file.read_to_string(&mut stderr)?;

            return Err(ProcessError::ProcessFailed {
                code: status.code().unwrap_or(-1),
                stderr: stderr.trim().to_string(),
            });
        }

        debug!("ffmpeg finished successfully");
        Ok(())
    }
}

//! Media handles.
//!
//! A handle is a probed input file held for the length of one operation.
//! `close` consumes the handle; dropping it without closing (an early `?`
//! return, say) releases it all the same, so every handle is released
//! exactly once.

use crate::error::{ProcessError, ProcessResult};
use crate::ffmpeg::{probe, MediaInfo, Toolchain};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Fail with a `MissingInput` error naming `what` if `path` does not exist.
pub fn ensure_input(path: &Path, what: &'static str) -> ProcessResult<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(ProcessError::MissingInput {
            what,
            path: path.to_path_buf(),
        })
    }
}

#[derive(Debug)]
struct Handle {
    path: PathBuf,
    info: MediaInfo,
    released: bool,
}

impl Handle {
    fn open(tools: &Toolchain, path: &Path, what: &'static str) -> ProcessResult<Self> {
        ensure_input(path, what)?;
        let info = probe(tools, path)?;
        debug!("Opened {:?}", path);
        Ok(Self {
            path: path.to_path_buf(),
            info,
            released: false,
        })
    }

    fn release(&mut self) {
        if !self.released {
            self.released = true;
            debug!("Released {:?}", self.path);
        }
    }
}

impl Drop for Handle {
    fn drop(&mut self) {
        self.release();
    }
}

/// An opened video file.
#[derive(Debug)]
pub struct VideoClip {
    handle: Handle,
}

impl VideoClip {
    /// Open and probe a video file. Fails if it has no video stream.
    pub fn open(tools: &Toolchain, path: impl AsRef<Path>) -> ProcessResult<Self> {
        let path = path.as_ref();
        let handle = Handle::open(tools, path, "Video file")?;
        if !handle.info.has_video() {
            return Err(ProcessError::NoStream {
                kind: "video",
                path: path.to_path_buf(),
            });
        }
        Ok(Self { handle })
    }

    /// Wrap already-probed info, for callers that probed themselves.
    pub fn from_info(path: impl Into<PathBuf>, info: MediaInfo) -> Self {
        Self {
            handle: Handle {
                path: path.into(),
                info,
                released: false,
            },
        }
    }

    pub fn path(&self) -> &Path {
        &self.handle.path
    }

    pub fn info(&self) -> &MediaInfo {
        &self.handle.info
    }

    pub fn duration(&self) -> f64 {
        self.handle.info.duration
    }

    /// Whether the file carries its own audio track.
    pub fn has_audio(&self) -> bool {
        self.handle.info.has_audio()
    }

    /// Release the handle.
    pub fn close(mut self) {
        self.handle.release();
    }
}

/// An opened audio file.
#[derive(Debug)]
pub struct AudioClip {
    handle: Handle,
}

impl AudioClip {
    /// Open and probe an audio file. Fails if it has no audio stream.
    pub fn open(tools: &Toolchain, path: impl AsRef<Path>) -> ProcessResult<Self> {
        let path = path.as_ref();
        let handle = Handle::open(tools, path, "Audio file")?;
        if !handle.info.has_audio() {
            return Err(ProcessError::NoStream {
                kind: "audio",
                path: path.to_path_buf(),
            });
        }
        Ok(Self { handle })
    }

    pub fn path(&self) -> &Path {
        &self.handle.path
    }

    pub fn info(&self) -> &MediaInfo {
        &self.handle.info
    }

    pub fn duration(&self) -> f64 {
        self.handle.info.duration
    }

    /// Release the handle.
    pub fn close(mut self) {
        self.handle.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_input_names_path() {
        let err = ensure_input(Path::new("/nonexistent/clip.mp4"), "Video file").unwrap_err();
        assert!(err.is_preflight());
        assert_eq!(err.to_string(), "Video file not found: /nonexistent/clip.mp4");
    }

    #[test]
    fn test_ensure_input_accepts_existing_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(ensure_input(file.path(), "Input file").is_ok());
    }

    #[test]
    fn test_open_missing_file_skips_probe() {
        // A toolchain pointing nowhere proves the probe never runs
        let tools = Toolchain {
            ffmpeg: PathBuf::from("/nonexistent/ffmpeg"),
            ffprobe: PathBuf::from("/nonexistent/ffprobe"),
        };
        let err = VideoClip::open(&tools, "/nonexistent/clip.mp4").unwrap_err();
        assert!(matches!(err, ProcessError::MissingInput { what: "Video file", .. }));

        let err = AudioClip::open(&tools, "/nonexistent/song.mp3").unwrap_err();
        assert!(matches!(err, ProcessError::MissingInput { what: "Audio file", .. }));
    }

    #[test]
    fn test_close_releases_once() {
        let info = MediaInfo {
            duration: 4.0,
            video_codec: Some("h264".into()),
            ..Default::default()
        };
        let clip = VideoClip::from_info("a.mp4", info);
        assert_eq!(clip.duration(), 4.0);
        assert!(!clip.has_audio());
        assert!(!clip.handle.released);
        clip.close();
    }
}

//! Vidkit CLI - shared startup, logging, and reporting for the vidkit tools.
//!
//! Every binary goes through [`launch`]: configuration is loaded and, for
//! the editing tools, FFmpeg is located before arguments are parsed.

pub mod commands;
mod progress;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use vidkit_config::Config;
use vidkit_process::{
    EncodeSettings, GifSettings, NoProgress, ProcessError, ProgressSink, Toolchain,
};

pub use progress::ProgressReporter;

/// Flags shared by every binary.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Don't show the encode progress bar
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// State shared by a command for the lifetime of the process.
#[derive(Debug)]
pub struct Session {
    pub config: Config,
    tools: Option<Toolchain>,
    progress: bool,
}

impl Session {
    fn new(config: Config) -> Self {
        let progress = config.ui.progress;
        Self {
            config,
            tools: None,
            progress,
        }
    }

    /// Apply parsed global flags: logging level and progress display.
    pub fn apply_globals(&mut self, globals: &GlobalArgs) {
        init_logging(globals.verbose);
        if globals.quiet {
            self.progress = false;
        }
    }

    /// The located FFmpeg tools, locating them on first use.
    pub fn tools(&mut self) -> Result<Toolchain> {
        if let Some(tools) = &self.tools {
            return Ok(tools.clone());
        }
        let tools = Toolchain::locate(&self.config.tools.ffmpeg, &self.config.tools.ffprobe)?;
        self.tools = Some(tools.clone());
        Ok(tools)
    }

    pub fn encode_settings(&self) -> EncodeSettings {
        let encoding = &self.config.encoding;
        EncodeSettings {
            video_codec: encoding.video_codec.clone(),
            audio_codec: encoding.audio_codec.clone(),
            preset: encoding.preset.clone(),
            crf: encoding.crf,
            pixel_format: encoding.pixel_format.clone(),
            audio_bitrate: encoding.audio_bitrate.clone(),
        }
    }

    pub fn gif_settings(&self) -> GifSettings {
        GifSettings {
            loop_count: self.config.gif.loop_count,
            dither: self.config.gif.dither.clone(),
        }
    }

    /// A progress sink labelled `message`, or a silent one when disabled.
    pub fn progress(&self, message: &str) -> Box<dyn ProgressSink> {
        if self.progress {
            Box::new(ProgressReporter::new(message))
        } else {
            Box::new(NoProgress)
        }
    }
}

/// Run a command body and exit the process with its outcome.
///
/// With `require_tools`, a missing FFmpeg or FFprobe is fatal before the
/// body (and therefore argument parsing) runs.
pub fn launch<F>(require_tools: bool, body: F) -> !
where
    F: FnOnce(&mut Session) -> Result<()>,
{
    let result = Config::load()
        .context("Failed to load config")
        .and_then(|config| {
            if !config.ui.color {
                colored::control::set_override(false);
            }
            let mut session = Session::new(config);
            if require_tools {
                session.tools()?;
            }
            body(&mut session)
        });

    match result {
        Ok(()) => std::process::exit(0),
        Err(err) => {
            report_error(&err);
            std::process::exit(1);
        }
    }
}

/// Print an error. Operator mistakes (a missing input or tool) go to
/// stdout; failures from FFmpeg or the filesystem go to stderr.
pub fn report_error(err: &anyhow::Error) {
    let preflight = err
        .chain()
        .find_map(|e| e.downcast_ref::<ProcessError>())
        .filter(|e| e.is_preflight());

    match preflight {
        Some(e) => println!("{} {}", "Error:".red().bold(), e),
        None => eprintln!("{} {:#}", "Error:".red().bold(), err),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("vidkit_cli=debug,vidkit_process=debug,vidkit_config=debug,info")
        })
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // try_init: a second call in the same process is a no-op
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_settings_follow_config() {
        let mut config = Config::default();
        config.encoding.video_codec = Some("mpeg4".into());
        config.encoding.crf = 30;
        config.gif.loop_count = -1;
        let session = Session::new(config);

        let encode = session.encode_settings();
        assert_eq!(encode.video_codec.as_deref(), Some("mpeg4"));
        assert_eq!(encode.crf, 30);
        assert_eq!(session.gif_settings().loop_count, -1);
    }

    #[test]
    fn test_quiet_disables_progress() {
        let mut session = Session::new(Config::default());
        assert!(session.progress);
        session.apply_globals(&GlobalArgs {
            verbose: false,
            quiet: true,
        });
        assert!(!session.progress);
    }

    #[test]
    fn test_missing_tool_is_preflight() {
        let err = anyhow::Error::from(ProcessError::MissingInput {
            what: "Video file",
            path: PathBuf::from("/nope.mp4"),
        })
        .context("while adding audio");

        let found = err
            .chain()
            .find_map(|e| e.downcast_ref::<ProcessError>())
            .map(|e| e.is_preflight());
        assert_eq!(found, Some(true));
    }
}

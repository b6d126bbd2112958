//! vidkit - one front door for the vidkit video tools.

use clap::{Parser, Subcommand};
use vidkit_cli::commands::{
    audio::AddAudioArgs, concat::ConcatArgs, gif::CreateGifArgs, overlay::TextOverlayArgs,
    speed::SpeedGifArgs, trim::TrimArgs,
};
use vidkit_cli::{commands, launch, GlobalArgs};

/// vidkit - Quick video edits on top of FFmpeg
#[derive(Parser)]
#[command(name = "vidkit")]
#[command(author = "Lalo Morales <lalomorales22@github.com>")]
#[command(version)]
#[command(about = "Quick video edits on top of FFmpeg", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add or replace a video's audio track
    AddAudio(AddAudioArgs),

    /// Burn text into a video
    AddTextOverlay(TextOverlayArgs),

    /// Join videos end to end, optionally with crossfades
    ConcatVideos(ConcatArgs),

    /// Turn part of a video into an animated GIF
    CreateGif(CreateGifArgs),

    /// Extract a time range of a video
    TrimVideo(TrimArgs),

    /// Speed a video up to a target length and save it as a GIF
    VideoToGifSpeed(SpeedGifArgs),

    /// Check that FFmpeg and FFprobe are installed
    Check,

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration
    Show,

    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the config file location
    Path,
}

fn main() {
    // Housekeeping commands must work without FFmpeg, so tools are located
    // per command rather than up front.
    launch(false, |session| {
        let cli = Cli::parse();
        session.apply_globals(&cli.global);

        match cli.command {
            Commands::AddAudio(args) => commands::audio::run(session, args),
            Commands::AddTextOverlay(args) => commands::overlay::run(session, args),
            Commands::ConcatVideos(args) => commands::concat::run(session, args),
            Commands::CreateGif(args) => commands::gif::run(session, args),
            Commands::TrimVideo(args) => commands::trim::run(session, args),
            Commands::VideoToGifSpeed(args) => commands::speed::run(session, args),
            Commands::Check => commands::check::run(session),
            Commands::Config(cmd) => match cmd {
                ConfigCommands::Show => commands::config::show(session),
                ConfigCommands::Init { force } => commands::config::init(force),
                ConfigCommands::Path => commands::config::path(),
            },
        }
    })
}

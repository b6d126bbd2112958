//! add-audio - Add or replace a video's audio track

use clap::Parser;
use vidkit_cli::commands::audio::{self, AddAudioArgs};
use vidkit_cli::{launch, GlobalArgs};

/// Add or replace a video's audio track
#[derive(Parser)]
#[command(name = "add-audio")]
#[command(version)]
#[command(about = "Add or replace a video's audio track", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(flatten)]
    args: AddAudioArgs,
}

fn main() {
    launch(true, |session| {
        let cli = Cli::parse();
        session.apply_globals(&cli.global);
        audio::run(session, cli.args)
    })
}

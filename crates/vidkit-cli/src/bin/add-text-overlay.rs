//! add-text-overlay - Burn text into a video

use clap::Parser;
use vidkit_cli::commands::overlay::{self, TextOverlayArgs};
use vidkit_cli::{launch, GlobalArgs};

/// Burn text into a video
#[derive(Parser)]
#[command(name = "add-text-overlay")]
#[command(version)]
#[command(about = "Burn text into a video", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(flatten)]
    args: TextOverlayArgs,
}

fn main() {
    launch(true, |session| {
        let cli = Cli::parse();
        session.apply_globals(&cli.global);
        overlay::run(session, cli.args)
    })
}

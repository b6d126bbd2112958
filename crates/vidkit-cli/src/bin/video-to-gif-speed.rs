//! video-to-gif-speed - Speed a video up to a target length and save it as a GIF

use clap::Parser;
use vidkit_cli::commands::speed::{self, SpeedGifArgs};
use vidkit_cli::{launch, GlobalArgs};

/// Speed a video up to a target length and save it as a GIF
#[derive(Parser)]
#[command(name = "video-to-gif-speed")]
#[command(version)]
#[command(about = "Speed a video up to a target length and save it as a GIF", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(flatten)]
    args: SpeedGifArgs,
}

fn main() {
    launch(true, |session| {
        let cli = Cli::parse();
        session.apply_globals(&cli.global);
        speed::run(session, cli.args)
    })
}

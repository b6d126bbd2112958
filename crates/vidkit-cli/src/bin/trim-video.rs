//! trim-video - Extract a time range of a video

use clap::Parser;
use vidkit_cli::commands::trim::{self, TrimArgs};
use vidkit_cli::{launch, GlobalArgs};

/// Extract a time range of a video
#[derive(Parser)]
#[command(name = "trim-video")]
#[command(version)]
#[command(about = "Extract a time range of a video", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(flatten)]
    args: TrimArgs,
}

fn main() {
    launch(true, |session| {
        let cli = Cli::parse();
        session.apply_globals(&cli.global);
        trim::run(session, cli.args)
    })
}

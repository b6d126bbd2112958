//! create-gif - Turn part of a video into an animated GIF

use clap::Parser;
use vidkit_cli::commands::gif::{self, CreateGifArgs};
use vidkit_cli::{launch, GlobalArgs};

/// Turn part of a video into an animated GIF
#[derive(Parser)]
#[command(name = "create-gif")]
#[command(version)]
#[command(about = "Turn part of a video into an animated GIF", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(flatten)]
    args: CreateGifArgs,
}

fn main() {
    launch(true, |session| {
        let cli = Cli::parse();
        session.apply_globals(&cli.global);
        gif::run(session, cli.args)
    })
}

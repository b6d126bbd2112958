//! concat-videos - Join videos end to end, optionally with crossfades

use clap::Parser;
use vidkit_cli::commands::concat::{self, ConcatArgs};
use vidkit_cli::{launch, GlobalArgs};

/// Join videos end to end, optionally with crossfades
#[derive(Parser)]
#[command(name = "concat-videos")]
#[command(version)]
#[command(about = "Join videos end to end, optionally with crossfades", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(flatten)]
    args: ConcatArgs,
}

fn main() {
    launch(true, |session| {
        let cli = Cli::parse();
        session.apply_globals(&cli.global);
        concat::run(session, cli.args)
    })
}

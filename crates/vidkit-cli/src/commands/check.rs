//! Check command - show whether FFmpeg and FFprobe are available.

use crate::Session;
use anyhow::Result;
use colored::Colorize;
use vidkit_process::check_dependencies;

pub fn run(session: &Session) -> Result<()> {
    let tools = &session.config.tools;
    let statuses = check_dependencies(&tools.ffmpeg, &tools.ffprobe);

    println!("{}", "External Tools".cyan().bold());
    println!("{}", "─".repeat(50));

    for status in &statuses {
        match &status.path {
            Some(path) => {
                println!("  {} {} ({})", "●".green(), status.name, path.display());
                if let Some(version) = &status.version {
                    println!("    {}", version.dimmed());
                }
            }
            None => println!("  {} {} not found", "✗".red(), status.name),
        }
    }

    if statuses.iter().all(|s| s.is_available()) {
        println!();
        println!("{} All tools available.", "✓".green());
        Ok(())
    } else {
        println!();
        println!(
            "{}",
            "Install FFmpeg from https://ffmpeg.org/download.html, or point VIDKIT_FFMPEG / VIDKIT_FFPROBE at the binaries."
                .dimmed()
        );
        anyhow::bail!("Required tools are missing")
    }
}

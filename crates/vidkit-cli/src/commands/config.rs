//! Configuration commands.

use crate::Session;
use anyhow::{Context, Result};
use colored::Colorize;
use vidkit_config::{AppPaths, Config};

fn paths() -> Result<AppPaths> {
    AppPaths::resolve().context("Failed to determine the config directory")
}

pub fn show(session: &Session) -> Result<()> {
    let paths = paths()?;
    let contents =
        toml::to_string_pretty(&session.config).context("Failed to serialize config")?;

    println!("{}", "Current Configuration".cyan().bold());
    if paths.config_file.exists() {
        println!("{}", paths.config_file.display().to_string().dimmed());
    } else {
        println!("{}", "(defaults; no config file)".dimmed());
    }
    println!("{}", "─".repeat(50));
    println!("{}", contents);

    Ok(())
}

pub fn init(force: bool) -> Result<()> {
    let paths = paths()?;

    if paths.config_file.exists() && !force {
        println!(
            "{} Config file already exists: {}",
            "Note:".yellow(),
            paths.config_file.display()
        );
        return Ok(());
    }

    paths
        .ensure_dirs()
        .context("Failed to create config directory")?;
    Config::create_default_file(&paths.config_file).context("Failed to write config file")?;

    println!(
        "{} Created config file: {}",
        "✓".green(),
        paths.config_file.display()
    );
    Ok(())
}

pub fn path() -> Result<()> {
    println!("{}", paths()?.config_file.display());
    Ok(())
}

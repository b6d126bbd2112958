//! CLI command implementations.

pub mod audio;
pub mod check;
pub mod concat;
pub mod config;
pub mod gif;
pub mod overlay;
pub mod speed;
pub mod trim;

use colored::Colorize;
use std::path::Path;

/// Print the final "Saved ... to: <path>" line.
fn report_saved(what: &str, path: &Path) {
    println!("{} {}", format!("Saved {} to:", what).green(), path.display());
}

//! Encode progress on stderr.

use indicatif::{ProgressBar, ProgressStyle};
use vidkit_process::ProgressSink;

/// Positions are tracked in milliseconds of output.
const TICKS_PER_SECOND: f64 = 1000.0;

/// Renders FFmpeg progress as an `indicatif` bar, or a spinner when the
/// output length isn't known up front.
pub struct ProgressReporter {
    message: String,
    bar: Option<ProgressBar>,
}

impl ProgressReporter {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
            bar: None,
        }
    }
}

impl ProgressSink for ProgressReporter {
    fn start(&mut self, total_seconds: Option<f64>) {
        let bar = match total_seconds {
            Some(total) if total > 0.0 => {
                let pb = ProgressBar::new((total * TICKS_PER_SECOND) as u64);
                if let Ok(style) = ProgressStyle::default_bar().template(
                    "{spinner:.green} {msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {percent}% ({eta})",
                ) {
                    pb.set_style(style.progress_chars("#>-"));
                }
                pb
            }
            _ => {
                let pb = ProgressBar::new_spinner();
                if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
                    pb.set_style(style);
                }
                pb
            }
        };
        bar.set_message(self.message.clone());
        self.bar = Some(bar);
    }

    fn update(&mut self, seconds: f64) {
        if let Some(bar) = &self.bar {
            if bar.length().is_some() {
                bar.set_position((seconds * TICKS_PER_SECOND) as u64);
            } else {
                bar.tick();
            }
        }
    }

    fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

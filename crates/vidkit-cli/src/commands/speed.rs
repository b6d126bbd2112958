//! Speed a video up to a target length and save it as a GIF.

use crate::Session;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use vidkit_process::filter::num;
use vidkit_process::{
    default_output_path, ensure_input, write_speed_gif, GifOptions, SpeedPlan, VideoClip,
};

#[derive(Debug, Clone, Args)]
pub struct SpeedGifArgs {
    /// Input video file
    pub input: PathBuf,

    /// Output GIF file (default: <input>_<duration>s.gif)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Target duration in seconds
    #[arg(short, long, default_value_t = 10.0)]
    pub duration: f64,

    /// Frames per second
    #[arg(long, default_value_t = 15)]
    pub fps: u32,

    /// Resize factor (0.5 = half size)
    #[arg(short, long, default_value_t = 0.5)]
    pub resize: f64,
}

pub fn run(session: &mut Session, args: SpeedGifArgs) -> Result<()> {
    ensure_input(&args.input, "Input file")?;

    let tools = session.tools()?;
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input, args.duration));

    println!("Loading video: {}", args.input.display());
    let clip = VideoClip::open(&tools, &args.input)?;

    let options = GifOptions {
        fps: args.fps,
        resize: args.resize,
    };
    let result = SpeedPlan::new(clip.duration(), args.duration, options).and_then(|plan| {
        println!("Original duration: {:.2}s", plan.original_duration);

        if plan.speeds_up() {
            println!("Speeding up by {:.2}x", plan.speed_factor);
        } else {
            println!(
                "Video already {}s or shorter, no speedup needed",
                num(plan.target_duration)
            );
        }
        if plan.resizes() {
            println!("Resized to {:.0}%", plan.options.resize * 100.0);
        }

        println!("Creating GIF: {}", output.display());
        let mut progress = session.progress("Creating GIF");
        write_speed_gif(
            &tools,
            &clip,
            &output,
            &plan,
            &session.gif_settings(),
            progress.as_mut(),
        )?;
        Ok(plan)
    });
    clip.close();

    let plan = result.context("Failed to create GIF")?;
    println!(
        "{} GIF duration: {:.2}s → {}",
        "✅".green(),
        plan.output_duration(),
        output.display()
    );
    Ok(())
}

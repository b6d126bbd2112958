//! The editing operations.

mod audio;
mod concat;
mod gif;
mod overlay;
mod speed;
mod subclip;
mod trim;

pub use audio::{add_audio, AudioMix, AudioStrategy};
pub use concat::concat_videos;
pub use gif::{create_gif, GifOptions};
pub use overlay::{overlay_text, TextOverlay};
pub use speed::{default_output_path, write_speed_gif, SpeedPlan};
pub use subclip::{Bound, ResolvedRange, Subclip};
pub use trim::trim_video;

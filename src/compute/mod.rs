//! Compute module - Dice genomes, twitch scheduling and evolution.

mod dice;
mod genome;
mod glide;
mod reader;
mod twitcher;

pub mod evolution;

pub use dice::*;
pub use genome::*;
pub use glide::*;
pub use reader::*;
pub use twitcher::*;

//! Schema module - Configuration, gene wire format and progress types.

mod config;
mod genes;
mod snapshot;

pub use config::*;
pub use genes::*;
pub use snapshot::*;

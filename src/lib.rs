//! Runner evolution - Dice-encoded genomes driving twitching bodies.
//!
//! Every gene is a string of six-sided dice read front to back. Readers roll
//! new dice whenever a gene runs short, so genomes grow as they are used.
//! A [`compute::Twitcher`] turns direction genes into a 36-slice actuation
//! cycle, and a [`compute::evolution::Population`] races mutated offspring
//! against the current winners, round after round.
//!
//! # Architecture
//!
//! - `schema`: Configuration, gene wire format and progress snapshots
//! - `compute`: Dice, genomes, twitch scheduling and the evolution engine
//!
//! # Example
//!
//! ```rust,no_run
//! use runner_evolution::{
//!     compute::{GlideRunner, empty_genome},
//!     compute::evolution::{MemoryGeneStore, Population, Runner},
//!     schema::{EvolutionConfig, GlideConfig},
//! };
//!
//! let mut ancestor = GlideRunner::grown(GlideConfig::default(), empty_genome());
//! ancestor.set_autopilot(true);
//!
//! let mut population =
//!     Population::new(ancestor, MemoryGeneStore::new(), EvolutionConfig::default()).unwrap();
//! while !population.iterate().is_terminal() {}
//!
//! for winner in population.winners() {
//!     println!("{}: {}", winner.name, winner.runner.genome());
//! }
//! ```

pub mod compute;
pub mod schema;

// Re-export commonly used types
pub use compute::evolution::{Population, Runner};
pub use compute::{Genome, GlideRunner, Twitcher};
pub use schema::{EvolutionConfig, EvolutionPhase, GlideConfig};

//! Evolutionary search over runner genomes.
//!
//! # Overview
//!
//! - **Runner** (`runner`): The contract a simulated body fulfils
//! - **Evolvers** (`evolver`): Named runners and checkpoint ranking
//! - **Population** (`population`): The round-based phase machine
//! - **Storage** (`storage`): Where winners' genes survive between runs
//!
//! # Example
//!
//! ```rust,no_run
//! use runner_evolution::compute::{GlideRunner, empty_genome};
//! use runner_evolution::compute::evolution::{MemoryGeneStore, Population, Runner};
//! use runner_evolution::schema::{EvolutionConfig, GlideConfig};
//!
//! let mut ancestor = GlideRunner::grown(GlideConfig::default(), empty_genome());
//! ancestor.set_autopilot(true);
//!
//! let mut population =
//!     Population::new(ancestor, MemoryGeneStore::new(), EvolutionConfig::default()).unwrap();
//! while !population.iterate().is_terminal() {}
//! println!("Finished with {}", population.phase());
//! ```
//!
//! # Phases
//!
//! A round runs `SurvivorsAdvance`, then `ChallengersBorn` (first round) or
//! `ChallengersReborn`, then `ChallengersOvertake`, `SurvivorsStored` and
//! `EvolutionAdvance`. The last round ends in `EvolutionDone`, or
//! `EvolutionHarder` when every winner reached the target.

mod evolver;
mod population;
mod runner;
mod storage;

#[cfg(test)]
pub(crate) mod mock;

pub use evolver::{Evolver, by_proximity, letter, rank_evolvers};
pub use population::{Population, PopulationError, SnapshotCallback};
pub use runner::{Runner, twitch_cycles};
pub use storage::{GeneStore, JsonGeneStore, MemoryGeneStore, StorageError};

//! Configuration types for evolution runs and the glide demonstration body.

use serde::{Deserialize, Serialize};

use super::Point;

/// Top-level configuration for a population's evolution run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionConfig {
    /// Maximum cycles per round. One round per entry, usually increasing.
    #[serde(default = "default_cycle_pattern")]
    pub cycle_pattern: Vec<usize>,
    /// Number of winners kept (and stored) after each round.
    #[serde(default = "default_persistent_population")]
    pub persistent_population: usize,
    /// Number of challengers raced against the winners.
    #[serde(default = "default_challenger_population")]
    pub challenger_population: usize,
    /// Count cycles from emitted twitches instead of the raw cycle counter.
    #[serde(default)]
    pub use_twitches: bool,
    /// Key under which winners' gene data is stored.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    /// Probability that a reborn challenger's twitch timing is also mutated.
    #[serde(default = "default_twitch_config_mutation_rate")]
    pub twitch_config_mutation_rate: f32,
    /// Random seed for reproducible mutation.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            cycle_pattern: default_cycle_pattern(),
            persistent_population: default_persistent_population(),
            challenger_population: default_challenger_population(),
            use_twitches: false,
            storage_key: default_storage_key(),
            twitch_config_mutation_rate: default_twitch_config_mutation_rate(),
            random_seed: None,
        }
    }
}

fn default_cycle_pattern() -> Vec<usize> {
    vec![4, 5, 6, 7, 8, 9]
}
fn default_persistent_population() -> usize {
    8
}
fn default_challenger_population() -> usize {
    8
}
fn default_storage_key() -> String {
    "runner".to_string()
}
fn default_twitch_config_mutation_rate() -> f32 {
    0.1
}

impl EvolutionConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cycle_pattern.is_empty() {
            return Err(ConfigError::EmptyCyclePattern);
        }
        if let Some(index) = self.cycle_pattern.iter().position(|&cycles| cycles == 0) {
            return Err(ConfigError::ZeroCycles { index });
        }
        if self.persistent_population == 0 {
            return Err(ConfigError::InvalidPopulation("persistent_population"));
        }
        if self.challenger_population == 0 {
            return Err(ConfigError::InvalidPopulation("challenger_population"));
        }
        if !(0.0..=1.0).contains(&self.twitch_config_mutation_rate) {
            return Err(ConfigError::InvalidRate(self.twitch_config_mutation_rate));
        }
        Ok(())
    }
}

/// Parameters of the glide demonstration body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlideConfig {
    /// Number of actuatable muscles.
    #[serde(default = "default_muscle_count")]
    pub muscle_count: usize,
    /// Ticks spent growing before the body is ready.
    #[serde(default = "default_growth_ticks")]
    pub growth_ticks: u32,
    /// Twitches counted as one cycle when cycles are measured by twitches.
    #[serde(default = "default_twitches_per_cycle")]
    pub twitches_per_cycle: usize,
    /// Where the body starts.
    #[serde(default)]
    pub start: Point,
    /// Where the body is heading.
    #[serde(default = "default_target")]
    pub target: Point,
    /// Velocity gained per unit of twitch intensity.
    #[serde(default = "default_impulse")]
    pub impulse: f32,
    /// Fraction of velocity kept per tick (0.0-1.0).
    #[serde(default = "default_damping")]
    pub damping: f32,
    /// Distance below which the target counts as reached.
    #[serde(default = "default_close_enough")]
    pub close_enough: f32,
}

impl Default for GlideConfig {
    fn default() -> Self {
        Self {
            muscle_count: default_muscle_count(),
            growth_ticks: default_growth_ticks(),
            twitches_per_cycle: default_twitches_per_cycle(),
            start: Point::ORIGIN,
            target: default_target(),
            impulse: default_impulse(),
            damping: default_damping(),
            close_enough: default_close_enough(),
        }
    }
}

fn default_muscle_count() -> usize {
    12
}
fn default_growth_ticks() -> u32 {
    60
}
fn default_twitches_per_cycle() -> usize {
    10
}
fn default_target() -> Point {
    Point::new(40.0, 0.0, 0.0)
}
fn default_impulse() -> f32 {
    0.02
}
fn default_damping() -> f32 {
    0.95
}
fn default_close_enough() -> f32 {
    4.0
}

impl GlideConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.muscle_count == 0 {
            return Err(ConfigError::NoMuscles);
        }
        if self.twitches_per_cycle == 0 {
            return Err(ConfigError::InvalidTwitchesPerCycle);
        }
        if !(0.0..=1.0).contains(&self.damping) {
            return Err(ConfigError::InvalidDamping(self.damping));
        }
        if self.close_enough <= 0.0 {
            return Err(ConfigError::InvalidCloseEnough);
        }
        Ok(())
    }
}

/// Everything the command-line runner reads from its config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default)]
    pub evolution: EvolutionConfig,
    #[serde(default)]
    pub glide: GlideConfig,
}

impl RunConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.evolution.validate()?;
        self.glide.validate()
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cycle pattern must have at least one round")]
    EmptyCyclePattern,
    #[error("Cycle pattern entry {index} must be non-zero")]
    ZeroCycles { index: usize },
    #[error("{0} must be non-zero")]
    InvalidPopulation(&'static str),
    #[error("Mutation rate {0} must be within 0.0-1.0")]
    InvalidRate(f32),
    #[error("Body must have at least one muscle")]
    NoMuscles,
    #[error("Twitches per cycle must be non-zero")]
    InvalidTwitchesPerCycle,
    #[error("Damping {0} must be within 0.0-1.0")]
    InvalidDamping(f32),
    #[error("Close-enough distance must be positive")]
    InvalidCloseEnough,
}

//! Cyclic muscle actuation decoded from direction genes.
//!
//! Every cycle has exactly [`SLICES_PER_CYCLE`] time slices. The genome only
//! tunes how many ticks a slice lasts, so cycles from different genomes stay
//! comparable checkpoint by checkpoint.

use std::collections::HashMap;

use super::genome::Genome;
use super::reader::GeneReader;
use crate::schema::{Direction, GeneName};

/// Scheduling slots per cycle.
pub const SLICES_PER_CYCLE: usize = 36;

/// Identifier of an actuatable muscle, owned by the body layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MuscleId(pub usize);

/// A scheduled actuation.
#[derive(Debug, Clone, PartialEq)]
pub struct Twitch {
    /// Time slice in `[0, SLICES_PER_CYCLE)`.
    pub when: usize,
    pub muscle: MuscleId,
    /// Rise time, a multiple of [`TwitchConfig::attack_period`].
    pub attack: f32,
    /// Fall time, a multiple of [`TwitchConfig::decay_period`].
    pub decay: f32,
    /// Strength in `[0.2, 0.4]`, shared by the whole schedule.
    pub intensity: f32,
}

/// Timing parameters decoded from the twitch configuration gene.
#[derive(Debug, Clone, PartialEq)]
pub struct TwitchConfig {
    /// Extra ticks spent in each slice.
    pub ticks_per_slice: u32,
    /// Intensity handed to every twitch.
    pub twitch_nuance: f32,
    /// Base period in `[600, 800]`.
    pub muscle_period: f32,
    /// Unit for twitch attack, `muscle_period` scaled by `[0.1, 0.5]`.
    pub attack_period: f32,
    /// Unit for twitch decay, `muscle_period` scaled by `[0.1, 0.5]`.
    pub decay_period: f32,
}

impl TwitchConfig {
    /// Decode from the genome's twitch configuration gene, growing it as needed.
    pub fn read(genome: &mut Genome) -> Self {
        let mut reader = genome.create_reader(GeneName::TwitchConfig);
        let muscle_period = reader.read_feature_value(600.0, 800.0);
        let attack_period = muscle_period * reader.read_feature_value(0.1, 0.5);
        let decay_period = muscle_period * reader.read_feature_value(0.1, 0.5);
        let ticks_per_slice = reader.read_feature_value(2.0, 6.0).round() as u32;
        let twitch_nuance = reader.read_feature_value(0.2, 0.4);
        Self {
            ticks_per_slice,
            twitch_nuance,
            muscle_period,
            attack_period,
            decay_period,
        }
    }
}

/// One direction's twitches filed by time slice.
#[derive(Debug, Clone)]
pub struct TwitchCycle {
    slices: Vec<Vec<Twitch>>,
}

impl TwitchCycle {
    /// Read up to `total_twitches` twitches, never scheduling a muscle twice.
    pub fn read(
        reader: &mut GeneReader<'_>,
        config: &TwitchConfig,
        muscles: &[MuscleId],
        total_twitches: usize,
    ) -> Self {
        let mut slices = vec![Vec::new(); SLICES_PER_CYCLE];
        let mut remaining = muscles.to_vec();
        for _ in 0..total_twitches {
            let Some(twitch) = reader.read_muscle_twitch(&remaining, config) else {
                break;
            };
            remaining.retain(|&muscle| muscle != twitch.muscle);
            slices[twitch.when].push(twitch);
        }
        Self { slices }
    }

    pub fn twitches_at(&self, time_slice: usize) -> &[Twitch] {
        self.slices
            .get(time_slice)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Total scheduled twitches.
    pub fn len(&self) -> usize {
        self.slices.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn activate<F: FnMut(&Twitch)>(&self, time_slice: usize, emit: &mut F) -> usize {
        let twitches = self.twitches_at(time_slice);
        twitches.iter().for_each(|twitch| emit(twitch));
        twitches.len()
    }
}

/// Per-organism scheduler stepping through the twitch cycles.
#[derive(Debug, Clone)]
pub struct Twitcher {
    cycle_count: usize,
    twitch_count: usize,
    ticks_remaining: i64,
    time_slice: usize,
    cycles: HashMap<Direction, TwitchCycle>,
    config: TwitchConfig,
}

impl Twitcher {
    /// Decode the timing config and one cycle per moving direction.
    pub fn new(genome: &mut Genome, muscles: &[MuscleId]) -> Self {
        let config = TwitchConfig::read(genome);
        Self::with_config(genome, muscles, config)
    }

    /// Decode the direction cycles under an explicit timing config.
    pub fn with_config(genome: &mut Genome, muscles: &[MuscleId], config: TwitchConfig) -> Self {
        let total_twitches = genome.total_twitches();
        let mut cycles = HashMap::new();
        for direction in Direction::MOVING {
            let Some(gene_name) = direction.gene_name() else {
                continue;
            };
            let mut reader = genome.create_reader(gene_name);
            let cycle = TwitchCycle::read(&mut reader, &config, muscles, total_twitches);
            cycles.insert(direction, cycle);
        }
        Self {
            cycle_count: 0,
            twitch_count: 0,
            ticks_remaining: 0,
            time_slice: 0,
            cycles,
            config,
        }
    }

    /// Advance one simulation tick, emitting the twitches due for `direction`.
    ///
    /// Returns true on the tick that completes a cycle. No twitches are
    /// emitted on that tick.
    pub fn tick<F: FnMut(&Twitch)>(&mut self, direction: Direction, mut emit: F) -> bool {
        self.ticks_remaining -= 1;
        if self.ticks_remaining >= 0 {
            return false;
        }
        self.ticks_remaining = i64::from(self.config.ticks_per_slice);
        self.time_slice += 1;
        if self.time_slice >= SLICES_PER_CYCLE {
            self.time_slice = 0;
            self.cycle_count += 1;
            return true;
        }
        if let Some(cycle) = self.cycles.get(&direction) {
            self.twitch_count += cycle.activate(self.time_slice, &mut emit);
        }
        false
    }

    pub fn cycle_count(&self) -> usize {
        self.cycle_count
    }

    pub fn twitch_count(&self) -> usize {
        self.twitch_count
    }

    pub fn time_slice(&self) -> usize {
        self.time_slice
    }

    pub fn config(&self) -> &TwitchConfig {
        &self.config
    }

    pub fn cycle(&self, direction: Direction) -> Option<&TwitchCycle> {
        self.cycles.get(&direction)
    }
}

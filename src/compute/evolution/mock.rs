//! Deterministic runner for population tests.

use super::runner::{Runner, twitch_cycles};
use crate::compute::{Genome, empty_genome};
use crate::schema::{Direction, GeneData, Point};

/// Moves along x at a speed set by how often its genome was mutated, and
/// stops at its target.
///
/// Twitches are counted per tick until the target is reached.
#[derive(Debug, Clone)]
pub struct MockRunner {
    pub genome: Genome,
    pub ticks: usize,
    pub ticks_per_cycle: usize,
    pub twitches: usize,
    /// Twitches added per tick while short of the target.
    pub twitches_per_tick: usize,
    pub twitches_per_cycle: usize,
    pub ready: bool,
    pub target: f32,
    pub autopilot: bool,
    pub direction: Direction,
    pub history: Vec<Direction>,
}

impl MockRunner {
    pub fn new(ticks_per_cycle: usize, target: f32) -> Self {
        Self {
            genome: empty_genome(),
            ticks: 0,
            ticks_per_cycle,
            twitches: 0,
            twitches_per_tick: 0,
            twitches_per_cycle: 1,
            ready: true,
            target,
            autopilot: false,
            direction: Direction::ToA,
            history: vec![Direction::ToA],
        }
    }

    pub fn speed(&self) -> f32 {
        0.1 * (1 + self.genome.tosses()) as f32
    }

    pub fn position(&self) -> f32 {
        (self.ticks as f32 * self.speed()).min(self.target)
    }
}

impl Runner for MockRunner {
    fn iterate(&mut self) {
        if !self.ready {
            return;
        }
        if !self.reached_target() {
            self.twitches += self.twitches_per_tick;
        }
        self.ticks += 1;
    }

    fn is_ready(&self) -> bool {
        self.ready
    }

    fn distance_from_target(&self) -> f32 {
        (self.target - self.position()).abs()
    }

    fn reached_target(&self) -> bool {
        self.distance_from_target() < 0.5
    }

    fn cycle_count(&self, use_twitches: bool) -> usize {
        let raw = self.ticks / self.ticks_per_cycle;
        if use_twitches {
            twitch_cycles(raw, self.twitches, self.twitches_per_cycle)
        } else {
            raw
        }
    }

    fn genome(&self) -> &Genome {
        &self.genome
    }

    fn recycled(&self, gene_data: &[GeneData]) -> Self {
        Self {
            genome: Genome::from_gene_data_with_roll(self.genome.roll().clone(), gene_data),
            ticks: 0,
            twitches: 0,
            autopilot: false,
            history: vec![self.direction],
            ..self.clone()
        }
    }

    fn autopilot(&self) -> bool {
        self.autopilot
    }

    fn set_autopilot(&mut self, autopilot: bool) {
        self.autopilot = autopilot;
    }

    fn direction(&self) -> Direction {
        self.direction
    }

    fn direction_history(&self) -> &[Direction] {
        &self.history
    }

    fn midpoint(&self) -> Point {
        Point::new(self.position(), 0.0, 0.0)
    }
}

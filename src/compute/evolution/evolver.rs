//! Named evolvers and checkpoint ranking.

use std::cmp::Ordering;

use super::runner::Runner;
use crate::schema::EvolverSnapshot;

/// A runner in a population, with its distance to target at every checkpoint.
#[derive(Debug)]
pub struct Evolver<R> {
    /// Letter code from [`letter`]. Challengers add a letter to their parent's.
    pub name: String,
    /// The body being evolved, owned for its whole life in the population.
    pub runner: R,
    /// Distance to target indexed by cycle. Append-only.
    pub proximity_history: Vec<f32>,
    /// Whether this evolver's genome was kept after the last round.
    pub persisted: bool,
}

impl<R: Runner> Evolver<R> {
    pub fn new(name: impl Into<String>, runner: R, persisted: bool) -> Self {
        Self {
            name: name.into(),
            runner,
            proximity_history: Vec::new(),
            persisted,
        }
    }

    pub fn proximity_at(&self, cycle: usize) -> Option<f32> {
        self.proximity_history.get(cycle).copied()
    }

    /// Sample the distance to target for `cycle`, at most once per cycle.
    pub fn record_proximity(&mut self, cycle: usize) {
        if self.proximity_history.len() == cycle {
            self.proximity_history
                .push(self.runner.distance_from_target());
        }
    }

    /// Standing at `cycle`. Falls back to the live distance if that cycle was
    /// never sampled.
    pub fn snapshot(&self, cycle: usize) -> EvolverSnapshot {
        EvolverSnapshot {
            name: self.name.clone(),
            proximity: self
                .proximity_at(cycle)
                .unwrap_or_else(|| self.runner.distance_from_target()),
            tosses: self.runner.genome().tosses(),
            reached_target: self.runner.reached_target(),
            persisted: self.persisted,
        }
    }
}

/// Closer to target first. Unsampled evolvers sort last.
pub fn by_proximity<R: Runner>(a: &Evolver<R>, b: &Evolver<R>, cycle: usize) -> Ordering {
    let key = |e: &Evolver<R>| e.proximity_at(cycle).unwrap_or(f32::INFINITY);
    key(a).total_cmp(&key(b))
}

/// Sample every evolver at `cycle` and stable-sort by proximity.
pub fn rank_evolvers<R: Runner>(evolvers: &mut [Evolver<R>], cycle: usize) {
    for evolver in evolvers.iter_mut() {
        evolver.record_proximity(cycle);
    }
    evolvers.sort_by(|a, b| by_proximity(a, b, cycle));
}

/// Letter name for an index: 0 is 'A'.
pub fn letter(index: usize) -> char {
    char::from(b'A' + (index % 26) as u8)
}

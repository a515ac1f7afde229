//! Contract between the population and a simulated body.

use rand::Rng;

use crate::compute::Genome;
use crate::schema::{Direction, GeneData, GeneName, Point};

/// Cycle count when cycles are measured by emitted twitches.
///
/// A body that stops twitching (resting at its target, or with every twitch
/// filed under slice 0) still completes raw cycles, so the raw count is the
/// floor and a round can always reach its limit.
pub fn twitch_cycles(raw_cycles: usize, twitch_count: usize, twitches_per_cycle: usize) -> usize {
    (twitch_count / twitches_per_cycle.max(1)).max(raw_cycles)
}

/// A simulated organism the population can step, measure and recycle.
///
/// Implementations own their body simulation. The population never inspects
/// geometry beyond the midpoint and the distance to the target.
pub trait Runner: Sized {
    /// Advance one simulation step.
    fn iterate(&mut self);

    /// False while the body is still under construction.
    fn is_ready(&self) -> bool;

    fn distance_from_target(&self) -> f32;

    fn reached_target(&self) -> bool;

    /// Completed cycles, either raw or derived from emitted twitches.
    ///
    /// Must keep growing while the runner iterates, whichever way it counts,
    /// or a round never ends. See [`twitch_cycles`].
    fn cycle_count(&self, use_twitches: bool) -> usize;

    fn genome(&self) -> &Genome;

    /// A fresh body of the same kind running `gene_data`.
    ///
    /// The returned runner shares no mutable state with `self`.
    fn recycled(&self, gene_data: &[GeneData]) -> Self;

    fn autopilot(&self) -> bool;

    fn set_autopilot(&mut self, autopilot: bool);

    /// Current heading.
    fn direction(&self) -> Direction;

    /// Every heading chosen so far, in order.
    fn direction_history(&self) -> &[Direction];

    fn midpoint(&self) -> Point;

    /// Gene data for an offspring of this runner.
    ///
    /// Mutates the gene of every direction this runner steered in (all
    /// moving directions if it never steered), and the twitch timing gene
    /// with probability `twitch_config_rate`.
    fn mutated_gene_data<R: Rng + ?Sized>(
        &self,
        twitch_config_rate: f32,
        rng: &mut R,
    ) -> Vec<GeneData> {
        let history = self.direction_history();
        let mut targets: Vec<GeneName> = Direction::MOVING
            .into_iter()
            .filter(|direction| history.contains(direction))
            .filter_map(Direction::gene_name)
            .collect();
        if targets.is_empty() {
            targets = Direction::MOVING
                .into_iter()
                .filter_map(Direction::gene_name)
                .collect();
        }
        let mutate_twitch_config = rng.r#gen::<f32>() < twitch_config_rate;
        self.genome()
            .with_mutations(&targets, mutate_twitch_config, rng)
            .gene_data()
    }
}

//! Population phase machine.
//!
//! Winners advance to the round's cycle limit, challengers bred from them race
//! to the same limit, and the best of both are kept and stored. Each round
//! of the cycle pattern runs longer than the last. Ranking only happens when
//! the slowest evolver completes a cycle, so everyone is compared at the
//! same checkpoint.

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::evolver::{Evolver, by_proximity, letter, rank_evolvers};
use super::runner::Runner;
use super::storage::{GeneStore, StorageError};
use crate::schema::{
    ConfigError, Direction, EvolutionConfig, EvolutionPhase, EvolutionSnapshot, EvolverSnapshot,
    GeneData, GeneName, Point,
};

/// Snapshot callback type.
pub type SnapshotCallback = Box<dyn Fn(&EvolutionSnapshot) + Send + Sync>;

/// Errors constructing a population.
#[derive(Debug, thiserror::Error)]
pub enum PopulationError {
    #[error("Invalid evolution config: {0}")]
    Config(#[from] ConfigError),
    #[error("Cannot evolve from a runner that is still under construction")]
    AncestorNotReady,
    #[error("Ancestor direction {0:?} has no gene to mutate")]
    NoDirectionGene(Direction),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// A set of evolvers raced round after round.
pub struct Population<R, S> {
    config: EvolutionConfig,
    ancestor: R,
    ancestor_gene: GeneName,
    store: S,
    stored_genomes: Vec<Vec<GeneData>>,
    rng: StdRng,
    winners: Vec<Evolver<R>>,
    challengers: Vec<Evolver<R>>,
    phase: EvolutionPhase,
    cycle_pattern_index: usize,
    current_cycle: usize,
    current_max_cycles: usize,
    midpoint: Point,
    challengers_visible: bool,
    snapshots: Vec<EvolutionSnapshot>,
    on_snapshot: Option<SnapshotCallback>,
}

impl<R: Runner, S: GeneStore> Population<R, S> {
    /// Seed winners from the genomes stored under the config's key, or from
    /// the ancestor's own genome when nothing is stored yet.
    pub fn new(ancestor: R, store: S, config: EvolutionConfig) -> Result<Self, PopulationError> {
        config.validate()?;
        if !ancestor.is_ready() {
            return Err(PopulationError::AncestorNotReady);
        }
        let direction = ancestor.direction();
        let ancestor_gene = direction
            .gene_name()
            .ok_or(PopulationError::NoDirectionGene(direction))?;
        let stored_genomes = store.read_genomes(&config.storage_key)?;
        let rng = match config.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self::start(
            config,
            ancestor,
            ancestor_gene,
            store,
            stored_genomes,
            rng,
        ))
    }

    fn start(
        config: EvolutionConfig,
        ancestor: R,
        ancestor_gene: GeneName,
        store: S,
        mut stored_genomes: Vec<Vec<GeneData>>,
        rng: StdRng,
    ) -> Self {
        if stored_genomes.is_empty() {
            stored_genomes.push(ancestor.genome().gene_data());
        }
        let winners = (0..config.persistent_population)
            .map(|index| {
                let gene_data = &stored_genomes[index % stored_genomes.len()];
                let mut runner = ancestor.recycled(gene_data);
                runner.set_autopilot(true);
                Evolver::new(letter(index).to_string(), runner, true)
            })
            .collect();
        let current_max_cycles = config.cycle_pattern.first().copied().unwrap_or_default();
        log::info!(
            "Population of {} started with cycle pattern {:?}",
            config.persistent_population,
            config.cycle_pattern
        );
        Self {
            midpoint: ancestor.midpoint(),
            config,
            ancestor,
            ancestor_gene,
            store,
            stored_genomes,
            rng,
            winners,
            challengers: Vec::new(),
            phase: EvolutionPhase::SurvivorsAdvance,
            cycle_pattern_index: 0,
            current_cycle: 0,
            current_max_cycles,
            challengers_visible: false,
            snapshots: Vec::new(),
            on_snapshot: None,
        }
    }

    /// Set the snapshot callback.
    pub fn with_snapshot_callback(mut self, callback: SnapshotCallback) -> Self {
        self.on_snapshot = Some(callback);
        self
    }

    /// A fresh population from the same ancestor and latest stored genomes,
    /// with the last round of the cycle pattern removed.
    ///
    /// Returns `None` once the pattern is shorter than three rounds.
    pub fn with_reduced_cycle_pattern(self) -> Option<Self> {
        if self.config.cycle_pattern.len() < 3 {
            log::info!("Cycle pattern {:?} cannot shrink further", self.config.cycle_pattern);
            return None;
        }
        let Population {
            mut config,
            ancestor,
            ancestor_gene,
            store,
            stored_genomes,
            rng,
            on_snapshot,
            ..
        } = self;
        config.cycle_pattern.pop();
        let mut population = Self::start(config, ancestor, ancestor_gene, store, stored_genomes, rng);
        population.on_snapshot = on_snapshot;
        Some(population)
    }

    /// Run one step of the current phase and return the resulting phase.
    pub fn iterate(&mut self) -> EvolutionPhase {
        match self.phase {
            EvolutionPhase::SurvivorsAdvance => self.survivors_advance(),
            EvolutionPhase::ChallengersBorn => self.challengers_born(),
            EvolutionPhase::ChallengersReborn => self.challengers_reborn(),
            EvolutionPhase::ChallengersOvertake => self.challengers_overtake(),
            EvolutionPhase::SurvivorsStored => self.survivors_stored(),
            EvolutionPhase::EvolutionAdvance => self.evolution_advance(),
            EvolutionPhase::EvolutionDone | EvolutionPhase::EvolutionHarder => {}
        }
        if let Some(midpoint) = Point::mean(
            self.winners
                .iter()
                .chain(&self.challengers)
                .map(|evolver| evolver.runner.midpoint()),
        ) {
            self.midpoint = midpoint;
        }
        self.phase
    }

    fn survivors_advance(&mut self) {
        let (moved, slowest) = advance(
            self.winners.iter_mut(),
            self.current_max_cycles,
            self.config.use_twitches,
        );
        if let Some(slowest) = slowest
            && slowest > self.current_cycle
        {
            rank_evolvers(&mut self.winners, self.current_cycle);
            self.current_cycle = slowest;
        }
        if moved {
            return;
        }
        if self.winners.iter().all(|winner| winner.runner.reached_target()) {
            self.set_phase(EvolutionPhase::EvolutionDone);
        } else {
            self.current_cycle = 0;
            if self.challengers.is_empty() {
                self.set_phase(EvolutionPhase::ChallengersBorn);
            } else {
                self.set_phase(EvolutionPhase::ChallengersReborn);
            }
        }
    }

    fn challengers_born(&mut self) {
        let parents = self.winners.len();
        let targets = [self.ancestor_gene];
        let mut challengers = Vec::with_capacity(self.config.challenger_population);
        for index in 0..self.config.challenger_population {
            let parent = &self.winners[index % parents];
            let genome = parent
                .runner
                .genome()
                .with_mutations(&targets, false, &mut self.rng);
            let mut runner = self.ancestor.recycled(&genome.gene_data());
            runner.set_autopilot(true);
            let name = format!("{}{}", letter(index + parents), letter(index % parents));
            challengers.push(Evolver::new(name, runner, false));
        }
        self.challengers = challengers;
        self.set_phase(EvolutionPhase::ChallengersOvertake);
    }

    fn challengers_reborn(&mut self) {
        let parents = self.winners.len();
        let rate = self.config.twitch_config_mutation_rate;
        let previous = std::mem::take(&mut self.challengers);
        let mut challengers = Vec::with_capacity(previous.len());
        for (index, challenger) in previous.into_iter().enumerate() {
            let parent = &self.winners[index % parents];
            let gene_data = parent.runner.mutated_gene_data(rate, &mut self.rng);
            let mut runner = challenger.runner.recycled(&gene_data);
            runner.set_autopilot(true);
            let name = format!("{}{}", parent.name, letter(index));
            challengers.push(Evolver::new(name, runner, false));
        }
        self.challengers = challengers;
        self.set_phase(EvolutionPhase::ChallengersOvertake);
    }

    fn challengers_overtake(&mut self) {
        self.challengers_visible = true;
        let (moved, slowest) = advance(
            self.winners.iter_mut().chain(self.challengers.iter_mut()),
            self.current_max_cycles,
            self.config.use_twitches,
        );
        if let Some(slowest) = slowest
            && slowest > self.current_cycle
        {
            let cycle = self.current_cycle;
            self.winners
                .iter_mut()
                .chain(self.challengers.iter_mut())
                .for_each(|evolver| evolver.record_proximity(cycle));
            let mut ranked: Vec<&Evolver<R>> =
                self.winners.iter().chain(&self.challengers).collect();
            ranked.sort_by(|a, b| by_proximity(a, b, cycle));
            let snapshots = ranked.iter().map(|evolver| evolver.snapshot(cycle)).collect();
            self.broadcast_snapshot(snapshots);
            self.current_cycle = slowest;
        }
        if !moved {
            self.set_phase(EvolutionPhase::SurvivorsStored);
        }
    }

    fn survivors_stored(&mut self) {
        let cycle = self.current_cycle;
        let mut winners: Vec<Evolver<R>> = std::mem::take(&mut self.winners)
            .into_iter()
            .chain(std::mem::take(&mut self.challengers))
            .collect();
        rank_evolvers(&mut winners, cycle);
        let keep = self.config.persistent_population.min(winners.len());
        let mut losers = winners.split_off(keep);
        winners.iter_mut().for_each(|winner| winner.persisted = true);
        losers.iter_mut().for_each(|loser| loser.persisted = false);

        let genomes: Vec<Vec<GeneData>> = winners
            .iter()
            .map(|winner| winner.runner.genome().gene_data())
            .collect();
        if let Err(error) = self.store.write_genomes(&self.config.storage_key, &genomes) {
            log::warn!("Failed to store winners' genes: {error}");
        }
        self.stored_genomes = genomes;

        let snapshots = winners.iter().map(|winner| winner.snapshot(cycle)).collect();
        self.winners = winners;
        self.challengers = losers;
        self.broadcast_snapshot(snapshots);
        self.challengers_visible = false;
        self.set_phase(EvolutionPhase::EvolutionAdvance);
    }

    fn evolution_advance(&mut self) {
        let last_index = self.config.cycle_pattern.len().saturating_sub(1);
        if self.cycle_pattern_index >= last_index {
            if self.winners.iter().all(|winner| winner.runner.reached_target()) {
                self.set_phase(EvolutionPhase::EvolutionHarder);
            } else {
                self.set_phase(EvolutionPhase::EvolutionDone);
            }
        } else {
            self.cycle_pattern_index += 1;
            self.current_max_cycles = self.config.cycle_pattern[self.cycle_pattern_index];
            self.current_cycle = 0;
            log::info!(
                "Round {} of {}: up to {} cycles",
                self.cycle_pattern_index + 1,
                self.config.cycle_pattern.len(),
                self.current_max_cycles
            );
            self.set_phase(EvolutionPhase::SurvivorsAdvance);
        }
    }

    fn set_phase(&mut self, phase: EvolutionPhase) {
        if phase != self.phase {
            log::info!("{} -> {}", self.phase, phase);
        }
        self.phase = phase;
    }

    /// Record a snapshot: replaces the latest for the same round, appends a
    /// new round, and restarts the list when an earlier round comes back.
    fn broadcast_snapshot(&mut self, evolver_snapshots: Vec<EvolverSnapshot>) {
        let snapshot = EvolutionSnapshot {
            cycle_pattern: self.config.cycle_pattern.clone(),
            cycle_index: self.cycle_pattern_index,
            cycle: self.current_cycle,
            evolver_snapshots,
        };
        log::debug!(
            "Checkpoint round {} cycle {}: {} evolvers",
            snapshot.cycle_index,
            snapshot.cycle,
            snapshot.evolver_snapshots.len()
        );
        if let Some(callback) = &self.on_snapshot {
            callback(&snapshot);
        }
        let latest = self.snapshots.len().checked_sub(1);
        match self
            .snapshots
            .iter()
            .position(|s| s.cycle_index == snapshot.cycle_index)
        {
            None => self.snapshots.push(snapshot),
            Some(index) if Some(index) == latest => self.snapshots[index] = snapshot,
            Some(_) => self.snapshots = vec![snapshot],
        }
    }

    pub fn phase(&self) -> EvolutionPhase {
        self.phase
    }

    pub fn winners(&self) -> &[Evolver<R>] {
        &self.winners
    }

    pub fn challengers(&self) -> &[Evolver<R>] {
        &self.challengers
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    pub fn cycle_pattern(&self) -> &[usize] {
        &self.config.cycle_pattern
    }

    pub fn cycle_pattern_index(&self) -> usize {
        self.cycle_pattern_index
    }

    pub fn current_cycle(&self) -> usize {
        self.current_cycle
    }

    pub fn current_max_cycles(&self) -> usize {
        self.current_max_cycles
    }

    /// Mean position of all evolvers, for display.
    pub fn midpoint(&self) -> Point {
        self.midpoint
    }

    pub fn challengers_visible(&self) -> bool {
        self.challengers_visible
    }

    /// Snapshots of the current run, oldest first.
    pub fn snapshots(&self) -> &[EvolutionSnapshot] {
        &self.snapshots
    }

    pub fn ancestor(&self) -> &R {
        &self.ancestor
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

/// Step every evolver still below `max_cycles`.
///
/// Returns whether anyone moved and the slowest cycle count seen before
/// stepping.
fn advance<'a, R, I>(evolvers: I, max_cycles: usize, use_twitches: bool) -> (bool, Option<usize>)
where
    R: Runner + 'a,
    I: Iterator<Item = &'a mut Evolver<R>>,
{
    let mut moved = false;
    let mut slowest: Option<usize> = None;
    for evolver in evolvers {
        let cycles = evolver.runner.cycle_count(use_twitches);
        slowest = Some(slowest.map_or(cycles, |s| s.min(cycles)));
        if cycles < max_cycles {
            evolver.runner.iterate();
            moved = true;
        }
    }
    (moved, slowest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::evolution::mock::MockRunner;
    use crate::compute::evolution::storage::MemoryGeneStore;
    use crate::compute::{DICE, Genome, GlideRunner, Roll};
    use crate::schema::GlideConfig;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const MAX_STEPS: usize = 100_000;

    fn config(pattern: Vec<usize>, persistent: usize, challengers: usize) -> EvolutionConfig {
        EvolutionConfig {
            cycle_pattern: pattern,
            persistent_population: persistent,
            challenger_population: challengers,
            random_seed: Some(42),
            ..Default::default()
        }
    }

    fn population(
        pattern: Vec<usize>,
        target: f32,
    ) -> Population<MockRunner, MemoryGeneStore> {
        Population::new(
            MockRunner::new(3, target),
            MemoryGeneStore::new(),
            config(pattern, 8, 8),
        )
        .unwrap()
    }

    /// Iterate until `phase` is reached, returning the phases passed through.
    fn run_until<R: Runner>(
        population: &mut Population<R, MemoryGeneStore>,
        phase: EvolutionPhase,
    ) -> Vec<EvolutionPhase> {
        let mut phases = vec![population.phase()];
        for _ in 0..MAX_STEPS {
            let next = population.iterate();
            if phases.last() != Some(&next) {
                phases.push(next);
            }
            if next == phase || next.is_terminal() {
                return phases;
            }
        }
        panic!("{phase} not reached");
    }

    #[test]
    fn test_initial_winners() {
        let population = population(vec![4, 5, 6, 7, 8, 9], 1000.0);
        assert_eq!(population.phase(), EvolutionPhase::SurvivorsAdvance);
        assert_eq!(population.winners().len(), 8);
        assert!(population.challengers().is_empty());
        assert_eq!(population.current_max_cycles(), 4);
        let names: String = population.winners().iter().map(|w| w.name.as_str()).collect();
        assert_eq!(names, "ABCDEFGH");
        assert!(population.winners().iter().all(|w| w.persisted && w.runner.autopilot));
    }

    #[test]
    fn test_first_round() {
        let mut population = population(vec![4, 5, 6, 7, 8, 9], 1000.0);
        let phases = run_until(&mut population, EvolutionPhase::EvolutionAdvance);
        assert_eq!(
            phases,
            vec![
                EvolutionPhase::SurvivorsAdvance,
                EvolutionPhase::ChallengersBorn,
                EvolutionPhase::ChallengersOvertake,
                EvolutionPhase::SurvivorsStored,
                EvolutionPhase::EvolutionAdvance,
            ]
        );
        assert_eq!(population.cycle_pattern_index(), 0);
        assert_eq!(population.winners().len(), 8);
        assert_eq!(population.challengers().len(), 8);

        population.iterate();
        assert_eq!(population.phase(), EvolutionPhase::SurvivorsAdvance);
        assert_eq!(population.cycle_pattern_index(), 1);
        assert_eq!(population.current_max_cycles(), 5);
        assert_eq!(population.current_cycle(), 0);
    }

    #[test]
    fn test_mutated_challengers_take_over() {
        let mut population = population(vec![4, 5, 6, 7, 8, 9], 1000.0);
        run_until(&mut population, EvolutionPhase::EvolutionAdvance);

        // Every born challenger tossed one die and moves faster
        assert!(population.winners().iter().all(|w| w.runner.genome().tosses() == 1));
        assert!(population.winners().iter().all(|w| w.persisted));
        assert!(population.challengers().iter().all(|c| !c.persisted));
        let names: Vec<&str> = population.winners().iter().map(|w| w.name.as_str()).collect();
        assert_eq!(names, vec!["IA", "JB", "KC", "LD", "ME", "NF", "OG", "PH"]);

        let stored = population.store().read_genomes("runner").unwrap();
        assert_eq!(stored.len(), 8);
        assert_eq!(stored[0], population.winners()[0].runner.genome().gene_data());
    }

    #[test]
    fn test_reborn_names_follow_parents() {
        let mut population = population(vec![4, 5, 6, 7, 8, 9], 1000.0);
        run_until(&mut population, EvolutionPhase::EvolutionAdvance);
        let phases = run_until(&mut population, EvolutionPhase::ChallengersOvertake);
        assert!(phases.contains(&EvolutionPhase::ChallengersReborn));
        assert!(!phases.contains(&EvolutionPhase::ChallengersBorn));

        let challengers = population.challengers();
        assert_eq!(challengers.len(), 8);
        assert_eq!(challengers[0].name, "IAA");
        assert_eq!(challengers[1].name, "JBB");
        assert!(challengers.iter().all(|c| c.runner.ticks == 0 && c.runner.autopilot));
    }

    #[test]
    fn test_population_sizes_hold() {
        let mut population = population(vec![2, 3, 4], 1000.0);
        for _ in 0..MAX_STEPS {
            let phase = population.iterate();
            assert_eq!(population.winners().len(), 8);
            assert!(population.challengers().is_empty() || population.challengers().len() == 8);
            for evolver in population.winners().iter().chain(population.challengers()) {
                assert!(evolver.proximity_history.len() <= population.current_max_cycles() + 1);
            }
            if phase.is_terminal() {
                break;
            }
        }
        assert_eq!(population.phase(), EvolutionPhase::EvolutionDone);
        assert_eq!(population.cycle_pattern_index(), 2);
    }

    #[test]
    fn test_snapshots_per_round() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let mut population = population(vec![4, 5, 6], 1000.0).with_snapshot_callback(Box::new(
            move |_: &EvolutionSnapshot| {
                counter.fetch_add(1, Ordering::SeqCst);
            },
        ));

        run_until(&mut population, EvolutionPhase::EvolutionAdvance);
        // Four overtake checkpoints plus the stored winners
        assert_eq!(calls.load(Ordering::SeqCst), 5);
        assert_eq!(population.snapshots().len(), 1);
        let latest = &population.snapshots()[0];
        assert_eq!(latest.cycle_index, 0);
        assert_eq!(latest.cycle, 4);
        assert_eq!(latest.evolver_snapshots.len(), 8);
        assert_eq!(latest.cycle_pattern, vec![4, 5, 6]);

        population.iterate();
        run_until(&mut population, EvolutionPhase::SurvivorsStored);
        assert_eq!(population.snapshots().len(), 2);
        assert_eq!(population.snapshots()[1].cycle_index, 1);
        assert_eq!(population.snapshots()[1].evolver_snapshots.len(), 16);
    }

    #[test]
    fn test_done_when_winners_reach_target() {
        // 4 cycles of 3 ticks at speed 0.1 lands exactly on the target
        let mut population = population(vec![4, 5], 1.2);
        let phases = run_until(&mut population, EvolutionPhase::EvolutionDone);
        assert_eq!(
            phases,
            vec![EvolutionPhase::SurvivorsAdvance, EvolutionPhase::EvolutionDone]
        );
    }

    #[test]
    fn test_harder_when_challengers_reach_target() {
        let mut population = Population::new(
            MockRunner::new(5, 2.2),
            MemoryGeneStore::new(),
            config(vec![2], 2, 2),
        )
        .unwrap();
        let phases = run_until(&mut population, EvolutionPhase::EvolutionHarder);
        assert_eq!(phases.last(), Some(&EvolutionPhase::EvolutionHarder));
        assert!(population.winners().iter().all(|w| w.runner.reached_target()));
        assert!(population.challengers().iter().all(|c| !c.runner.reached_target()));
    }

    #[test]
    fn test_twitch_mode_counts_twitches() {
        let mut ancestor = MockRunner::new(3, 1000.0);
        ancestor.twitches_per_tick = 2;
        ancestor.twitches_per_cycle = 3;
        let config = EvolutionConfig {
            use_twitches: true,
            ..config(vec![4], 2, 2)
        };
        let mut population = Population::new(ancestor, MemoryGeneStore::new(), config).unwrap();
        run_until(&mut population, EvolutionPhase::ChallengersBorn);

        // Four twitch cycles take six ticks, raw cycles would take twelve
        assert!(population.winners().iter().all(|w| w.runner.ticks == 6));
    }

    #[test]
    fn test_twitch_mode_finishes_after_twitching_stops() {
        let mut ancestor = MockRunner::new(3, 0.95);
        ancestor.twitches_per_tick = 1;
        let config = EvolutionConfig {
            use_twitches: true,
            ..config(vec![10], 2, 2)
        };
        let mut population = Population::new(ancestor, MemoryGeneStore::new(), config).unwrap();
        let phases = run_until(&mut population, EvolutionPhase::EvolutionDone);

        assert_eq!(
            phases,
            vec![EvolutionPhase::SurvivorsAdvance, EvolutionPhase::EvolutionDone]
        );
        for winner in population.winners() {
            assert_eq!(winner.runner.twitches, 5);
            assert_eq!(winner.runner.ticks, 30);
        }
    }

    #[test]
    fn test_glide_population_twitch_mode_terminates() {
        // Every twitch lands in slice 0 and never fires
        let roll: Roll = Arc::new(|| DICE[0]);
        let mut ancestor = GlideRunner::grown(GlideConfig::default(), Genome::new(roll, Vec::new()));
        ancestor.set_autopilot(true);
        let config = EvolutionConfig {
            use_twitches: true,
            ..config(vec![1], 2, 2)
        };
        let mut population = Population::new(ancestor, MemoryGeneStore::new(), config).unwrap();
        run_until(&mut population, EvolutionPhase::EvolutionDone);

        assert!(population.phase().is_terminal());
        assert!(population.winners().iter().all(|w| w.runner.cycle_count(true) == 1));
    }

    #[test]
    fn test_glide_population_terminates() {
        let mut ancestor = GlideRunner::grown(GlideConfig::default(), crate::compute::empty_genome());
        ancestor.set_autopilot(true);
        let mut population =
            Population::new(ancestor, MemoryGeneStore::new(), config(vec![1, 2], 2, 2)).unwrap();
        run_until(&mut population, EvolutionPhase::EvolutionDone);

        assert!(population.phase().is_terminal());
        assert_eq!(population.winners().len(), 2);
        assert_eq!(population.challengers().len(), 2);
        assert_eq!(population.store().read_genomes("runner").unwrap().len(), 2);
    }

    #[test]
    fn test_reduced_cycle_pattern() {
        let mut population = population(vec![4, 5, 6], 1000.0);
        run_until(&mut population, EvolutionPhase::EvolutionAdvance);
        let stored = population.store().read_genomes("runner").unwrap();

        let reduced = population.with_reduced_cycle_pattern().unwrap();
        assert_eq!(reduced.cycle_pattern(), &[4, 5]);
        assert_eq!(reduced.phase(), EvolutionPhase::SurvivorsAdvance);
        assert_eq!(reduced.cycle_pattern_index(), 0);
        assert!(reduced.snapshots().is_empty());
        assert!(reduced.challengers().is_empty());
        let genes: Vec<Vec<GeneData>> = reduced
            .winners()
            .iter()
            .map(|w| w.runner.genome().gene_data())
            .collect();
        assert_eq!(genes, stored);

        assert!(reduced.with_reduced_cycle_pattern().is_none());
    }

    #[test]
    fn test_seeded_from_store() {
        let mut store = MemoryGeneStore::new();
        let genome = crate::compute::empty_genome().with_mutations(
            &[GeneName::ToA, GeneName::ToB],
            false,
            &mut StdRng::seed_from_u64(1),
        );
        store.write_genomes("runner", &[genome.gene_data()]).unwrap();

        let population =
            Population::new(MockRunner::new(3, 1000.0), store, config(vec![4], 3, 3)).unwrap();
        assert_eq!(population.winners().len(), 3);
        assert!(population.winners().iter().all(|w| w.runner.genome().tosses() == 2));
    }

    #[test]
    fn test_ancestor_not_ready() {
        let mut ancestor = MockRunner::new(3, 1000.0);
        ancestor.ready = false;
        let result = Population::new(ancestor, MemoryGeneStore::new(), EvolutionConfig::default());
        assert!(matches!(result, Err(PopulationError::AncestorNotReady)));
    }

    #[test]
    fn test_resting_ancestor_rejected() {
        let mut ancestor = MockRunner::new(3, 1000.0);
        ancestor.direction = Direction::Rest;
        let result = Population::new(ancestor, MemoryGeneStore::new(), EvolutionConfig::default());
        assert!(matches!(
            result,
            Err(PopulationError::NoDirectionGene(Direction::Rest))
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = Population::new(
            MockRunner::new(3, 1000.0),
            MemoryGeneStore::new(),
            config(Vec::new(), 8, 8),
        );
        assert!(matches!(
            result,
            Err(PopulationError::Config(ConfigError::EmptyCyclePattern))
        ));
    }
}

//! A point-mass body that glides towards its target on twitch impulses.
//!
//! Each muscle pushes along its own axis in the body frame, spaced evenly
//! around the vertical. The body frame turns to face the current heading, so
//! a schedule that works for one direction has to be learned separately for
//! the others.

use std::f32::consts::TAU;

use super::genome::Genome;
use super::twitcher::{MuscleId, Twitch, Twitcher};
use crate::compute::evolution::{Runner, twitch_cycles};
use crate::schema::{Direction, GeneData, GlideConfig, Point};

/// Headings below this horizontal distance to the target are undefined.
const MIN_STEER_DISTANCE: f32 = 1e-4;

/// Heading angle in the horizontal plane, measured from +x towards +z.
fn heading_angle(direction: Direction) -> f32 {
    match direction {
        Direction::Rest | Direction::ToA => 0.0,
        Direction::ToB => TAU / 3.0,
        Direction::ToC => 2.0 * TAU / 3.0,
    }
}

fn horizontal(angle: f32) -> Point {
    Point::new(angle.cos(), 0.0, angle.sin())
}

/// Twitch-driven glider used as the demonstration body.
#[derive(Debug, Clone)]
pub struct GlideRunner {
    config: GlideConfig,
    genome: Genome,
    muscles: Vec<MuscleId>,
    twitcher: Option<Twitcher>,
    growth_remaining: u32,
    position: Point,
    velocity: Point,
    direction: Direction,
    direction_history: Vec<Direction>,
    autopilot: bool,
}

impl GlideRunner {
    /// A body that spends `config.growth_ticks` iterations growing before
    /// its twitch schedule is decoded.
    pub fn new(config: GlideConfig, genome: Genome) -> Self {
        let growth_ticks = config.growth_ticks;
        let mut runner = Self::unfinished(config, genome, growth_ticks);
        if growth_ticks == 0 {
            runner.finish_growth();
        }
        runner
    }

    /// A body that is ready immediately.
    pub fn grown(config: GlideConfig, genome: Genome) -> Self {
        let mut runner = Self::unfinished(config, genome, 0);
        runner.finish_growth();
        runner
    }

    fn unfinished(config: GlideConfig, genome: Genome, growth_remaining: u32) -> Self {
        Self {
            muscles: (0..config.muscle_count).map(MuscleId).collect(),
            position: config.start,
            config,
            genome,
            twitcher: None,
            growth_remaining,
            velocity: Point::ORIGIN,
            direction: Direction::Rest,
            direction_history: Vec::new(),
            autopilot: false,
        }
    }

    fn finish_growth(&mut self) {
        let twitcher = Twitcher::new(&mut self.genome, &self.muscles);
        log::debug!(
            "Grown with {} ticks per slice, genome {}",
            twitcher.config().ticks_per_slice,
            self.genome
        );
        self.twitcher = Some(twitcher);
        if self.autopilot {
            self.check_direction();
        }
    }

    /// Moving direction best aligned with the target, ignoring height.
    pub fn direction_to_target(&self) -> Direction {
        let mut to_target = self.config.target - self.position;
        to_target.y = 0.0;
        if to_target.length() < MIN_STEER_DISTANCE {
            return Direction::Rest;
        }
        Direction::MOVING
            .into_iter()
            .max_by(|a, b| {
                let along = |d: Direction| {
                    let heading = horizontal(heading_angle(d));
                    heading.x * to_target.x + heading.z * to_target.z
                };
                along(*a).total_cmp(&along(*b))
            })
            .unwrap_or_default()
    }

    /// Re-aim at the target. Rests once there, autopilot stays on.
    fn check_direction(&mut self) {
        if self.reached_target() {
            self.direction = Direction::Rest;
            return;
        }
        let direction = self.direction_to_target();
        self.direction = direction;
        if direction != Direction::Rest && self.direction_history.last() != Some(&direction) {
            log::trace!("Heading {direction:?}");
            self.direction_history.push(direction);
        }
    }

    fn push_for(&self, twitch: &Twitch) -> Point {
        let muscle_angle = TAU * twitch.muscle.0 as f32 / self.muscles.len() as f32;
        let strength = twitch.intensity * self.config.impulse * twitch.attack
            / (twitch.attack + twitch.decay);
        horizontal(muscle_angle + heading_angle(self.direction)).scaled(strength)
    }

    pub fn config(&self) -> &GlideConfig {
        &self.config
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn velocity(&self) -> Point {
        self.velocity
    }

    pub fn twitcher(&self) -> Option<&Twitcher> {
        self.twitcher.as_ref()
    }
}

impl Runner for GlideRunner {
    fn iterate(&mut self) {
        if self.growth_remaining > 0 {
            self.growth_remaining -= 1;
            if self.growth_remaining == 0 {
                self.finish_growth();
            }
            return;
        }
        self.position = self.position + self.velocity;
        self.velocity = self.velocity.scaled(self.config.damping);
        if !self.autopilot {
            return;
        }
        let Some(mut twitcher) = self.twitcher.take() else {
            return;
        };
        let mut push = Point::ORIGIN;
        let cycled = twitcher.tick(self.direction, |twitch| push = push + self.push_for(twitch));
        self.twitcher = Some(twitcher);
        self.velocity = self.velocity + push;
        if cycled {
            self.check_direction();
        }
    }

    fn is_ready(&self) -> bool {
        self.twitcher.is_some()
    }

    fn distance_from_target(&self) -> f32 {
        self.position.distance_to(&self.config.target)
    }

    fn reached_target(&self) -> bool {
        self.distance_from_target() < self.config.close_enough
    }

    fn cycle_count(&self, use_twitches: bool) -> usize {
        match &self.twitcher {
            Some(twitcher) if use_twitches => twitch_cycles(
                twitcher.cycle_count(),
                twitcher.twitch_count(),
                self.config.twitches_per_cycle,
            ),
            Some(twitcher) => twitcher.cycle_count(),
            None => 0,
        }
    }

    fn genome(&self) -> &Genome {
        &self.genome
    }

    fn recycled(&self, gene_data: &[GeneData]) -> Self {
        let genome = Genome::from_gene_data_with_roll(self.genome.roll().clone(), gene_data);
        Self::grown(self.config.clone(), genome)
    }

    fn autopilot(&self) -> bool {
        self.autopilot
    }

    fn set_autopilot(&mut self, autopilot: bool) {
        self.autopilot = autopilot;
        if autopilot && self.twitcher.is_some() {
            self.check_direction();
        }
    }

    fn direction(&self) -> Direction {
        self.direction
    }

    fn direction_history(&self) -> &[Direction] {
        &self.direction_history
    }

    fn midpoint(&self) -> Point {
        self.position
    }
}

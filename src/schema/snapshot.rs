//! Progress types published by a population at ranking checkpoints.

use std::fmt;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// Position in world space. Only used for distances and the display midpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point {
    pub const ORIGIN: Point = Point {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn distance_to(&self, other: &Point) -> f32 {
        (*other - *self).length()
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn scaled(&self, factor: f32) -> Point {
        Point::new(self.x * factor, self.y * factor, self.z * factor)
    }

    /// Arithmetic mean of the given points, `None` when empty.
    pub fn mean<I: IntoIterator<Item = Point>>(points: I) -> Option<Point> {
        let (sum, count) = points
            .into_iter()
            .fold((Point::ORIGIN, 0usize), |(sum, count), p| (sum + p, count + 1));
        (count > 0).then(|| sum.scaled(1.0 / count as f32))
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

/// Phase of the population state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EvolutionPhase {
    #[default]
    SurvivorsAdvance,
    ChallengersBorn,
    ChallengersReborn,
    ChallengersOvertake,
    SurvivorsStored,
    EvolutionAdvance,
    EvolutionDone,
    EvolutionHarder,
}

impl EvolutionPhase {
    /// `EvolutionDone` and `EvolutionHarder` end a population's run.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            EvolutionPhase::EvolutionDone | EvolutionPhase::EvolutionHarder
        )
    }
}

impl fmt::Display for EvolutionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EvolutionPhase::SurvivorsAdvance => "Survivors advance",
            EvolutionPhase::ChallengersBorn => "Challengers born",
            EvolutionPhase::ChallengersReborn => "Challengers reborn",
            EvolutionPhase::ChallengersOvertake => "Challengers try to overtake",
            EvolutionPhase::SurvivorsStored => "Survivors stored",
            EvolutionPhase::EvolutionAdvance => "Evolution advance",
            EvolutionPhase::EvolutionDone => "Evolution done",
            EvolutionPhase::EvolutionHarder => "Evolution harder",
        };
        f.write_str(label)
    }
}

/// One evolver's standing at a checkpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvolverSnapshot {
    pub name: String,
    pub proximity: f32,
    pub tosses: u32,
    pub reached_target: bool,
    pub persisted: bool,
}

/// Ranked standings at one checkpoint of one round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvolutionSnapshot {
    pub cycle_pattern: Vec<usize>,
    pub cycle_index: usize,
    pub cycle: usize,
    pub evolver_snapshots: Vec<EvolverSnapshot>,
}

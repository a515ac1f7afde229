//! Cursor decoding of a gene's dice into numbers and twitches.

use super::dice::{Die, Roll, nuance};
use super::genome::Gene;
use super::twitcher::{MuscleId, SLICES_PER_CYCLE, Twitch, TwitchConfig};

/// Reads one gene front to back, rolling new dice onto it when it runs out.
///
/// Reading the same gene twice in the same call order yields the same values,
/// since every rolled die is kept.
pub struct GeneReader<'a> {
    gene: &'a mut Gene,
    roll: &'a Roll,
    cursor: usize,
}

impl<'a> GeneReader<'a> {
    pub fn new(gene: &'a mut Gene, roll: &'a Roll) -> Self {
        Self {
            gene,
            roll,
            cursor: 0,
        }
    }

    /// Dice consumed so far.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Dice currently stored in the gene.
    pub fn len(&self) -> usize {
        self.gene.dice.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gene.dice.is_empty()
    }

    /// Next die, appending a fresh roll when past the end.
    pub fn next_die(&mut self) -> Die {
        if self.cursor >= self.gene.dice.len() {
            self.gene.dice.push((self.roll)());
        }
        let die = self.gene.dice[self.cursor];
        self.cursor += 1;
        die
    }

    /// Nuance in `[0, 1)` from the next `count` dice.
    ///
    /// # Panics
    ///
    /// Panics when `count` is zero.
    pub fn read_nuance(&mut self, count: usize) -> f32 {
        let dice: Vec<Die> = (0..count).map(|_| self.next_die()).collect();
        nuance(&dice)
    }

    /// Index in `[0, total)` from two dice.
    pub fn choose_from(&mut self, total: usize) -> usize {
        let value = (total as f32 * self.read_nuance(2)).floor() as usize;
        value.min(total.saturating_sub(1))
    }

    /// Interpolated value between `low` and `high` from three dice.
    pub fn read_feature_value(&mut self, low: f32, high: f32) -> f32 {
        let n = self.read_nuance(3);
        low * n + high * (1.0 - n)
    }

    /// Decode one twitch against the given muscles.
    ///
    /// Returns `None` without reading when there is no muscle to pick.
    pub fn read_muscle_twitch(
        &mut self,
        muscles: &[MuscleId],
        config: &TwitchConfig,
    ) -> Option<Twitch> {
        if muscles.is_empty() {
            return None;
        }
        let muscle = muscles[self.next_die().index() % muscles.len()];
        let when = self.choose_from(SLICES_PER_CYCLE);
        let attack = (2.0 + 6.0 * self.read_nuance(1)) * config.attack_period;
        let decay = (2.0 + 6.0 * self.read_nuance(1)) * config.decay_period;
        Some(Twitch {
            when,
            muscle,
            attack,
            decay,
            intensity: config.twitch_nuance,
        })
    }
}

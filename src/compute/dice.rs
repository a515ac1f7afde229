//! The six-symbol dice alphabet behind every gene.

use std::fmt;
use std::sync::Arc;

use rand::Rng;

/// One of six equiprobable symbols, identified by its index 0-5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Die(u8);

/// All dice in index order.
pub const DICE: [Die; 6] = [Die(0), Die(1), Die(2), Die(3), Die(4), Die(5)];

const SYMBOLS: [char; 6] = ['⚀', '⚁', '⚂', '⚃', '⚄', '⚅'];
const NUMERALS: [char; 6] = ['1', '2', '3', '4', '5', '6'];

impl Die {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Face symbol used in gene strings.
    pub fn symbol(self) -> char {
        SYMBOLS[self.index()]
    }

    /// Parse a face symbol or a numeral "1"-"6".
    pub fn from_char(c: char) -> Option<Die> {
        SYMBOLS
            .iter()
            .position(|&s| s == c)
            .or_else(|| NUMERALS.iter().position(|&n| n == c))
            .map(|index| DICE[index])
    }
}

impl fmt::Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

const BELOW_ONE: f32 = 1.0 - f32::EPSILON / 2.0;

/// Dice-rolling function shared by every genome descended from one ancestor.
pub type Roll = Arc<dyn Fn() -> Die + Send + Sync>;

/// Roll one fair die.
pub fn roll_the_dice() -> Die {
    DICE[rand::thread_rng().gen_range(0..DICE.len())]
}

/// Shareable handle to [`roll_the_dice`].
pub fn fair_roll() -> Roll {
    Arc::new(roll_the_dice)
}

/// Read dice as base-6 digits (most significant first) scaled into `[0, 1)`.
///
/// # Panics
///
/// Panics when `dice` is empty.
pub fn nuance(dice: &[Die]) -> f32 {
    assert!(!dice.is_empty(), "nuance needs at least one die");
    let base6 = dice
        .iter()
        .fold(0f64, |sum, die| sum * 6.0 + die.index() as f64);
    // Long sequences can round up to 1.0 in f32
    ((base6 / 6f64.powi(dice.len() as i32)) as f32).min(BELOW_ONE)
}

/// Render dice as a gene string.
pub fn serialize_dice(dice: &[Die]) -> String {
    dice.iter().map(|die| die.symbol()).collect()
}

/// Parse a gene string, silently dropping characters that are not dice.
pub fn deserialize_dice(gene_string: &str) -> Vec<Die> {
    gene_string.chars().filter_map(Die::from_char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_nuance_values() {
        assert_eq!(nuance(&[DICE[0]]), 0.0);
        assert!((nuance(&[DICE[5]]) - 5.0 / 6.0).abs() < 1e-6);
        assert!((nuance(&[DICE[5], DICE[5]]) - 35.0 / 36.0).abs() < 1e-6);
        assert!((nuance(&[DICE[1], DICE[0]]) - 6.0 / 36.0).abs() < 1e-6);
    }

    #[test]
    #[should_panic(expected = "at least one die")]
    fn test_nuance_without_dice() {
        nuance(&[]);
    }

    #[test]
    fn test_gene_string_roundtrip() {
        let dice = vec![DICE[0], DICE[3], DICE[5], DICE[2]];
        let gene_string = serialize_dice(&dice);
        assert_eq!(gene_string, "⚀⚃⚅⚂");
        assert_eq!(deserialize_dice(&gene_string), dice);
    }

    #[test]
    fn test_deserialize_drops_invalid() {
        assert_eq!(deserialize_dice("1x⚅7 3"), vec![DICE[0], DICE[5], DICE[2]]);
        assert!(deserialize_dice("garbage").is_empty());
    }

    #[test]
    fn test_roll_stays_in_alphabet() {
        for _ in 0..100 {
            assert!(roll_the_dice().index() < 6);
        }
    }

    proptest! {
        #[test]
        fn prop_nuance_in_unit_range(indices in proptest::collection::vec(0usize..6, 1..12)) {
            let dice: Vec<Die> = indices.iter().map(|&i| DICE[i]).collect();
            let value = nuance(&dice);
            prop_assert!((0.0..1.0).contains(&value));
        }
    }
}

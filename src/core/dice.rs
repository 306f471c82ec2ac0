//! Dice: the engine's only source of randomness.
//!
//! ## DiceSource
//!
//! The turn engine talks to dice through the [`DiceSource`] trait so tests
//! and front-ends can substitute scripted rolls.
//!
//! ## Dice
//!
//! The standard implementation rolls N six-sided dice from a seeded
//! ChaCha8 stream: same seed, same game. Recorded per-die values stay
//! observable until the next roll.
//!
//! ```
//! use boardkit::core::{Dice, DiceSource};
//!
//! let mut dice = Dice::new(2, 42).unwrap();
//! let values: Vec<u8> = dice.roll_all().to_vec();
//! assert_eq!(values.len(), 2);
//! assert_eq!(dice.sum_of_rolled(), values.iter().map(|&v| v as u32).sum::<u32>());
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use smallvec::SmallVec;

use crate::error::BoardError;

/// Source of dice rolls for the turn engine.
pub trait DiceSource {
    /// Roll every die, record the values, and return them.
    fn roll_all(&mut self) -> &[u8];

    /// Sum of the most recently rolled values; 0 before the first roll.
    fn sum_of_rolled(&self) -> u32;

    /// Number of dice rolled per turn.
    fn die_count(&self) -> usize;
}

/// Seeded six-sided dice.
#[derive(Clone, Debug)]
pub struct Dice {
    rng: ChaCha8Rng,
    rolled: SmallVec<[u8; 4]>,
    count: usize,
}

impl Dice {
    /// Create `count` dice over a seeded stream.
    ///
    /// Fails with `InvalidArgument` for a zero die count.
    pub fn new(count: usize, seed: u64) -> Result<Self, BoardError> {
        if count == 0 {
            return Err(BoardError::InvalidArgument(
                "die count must be positive".to_string(),
            ));
        }
        Ok(Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            rolled: SmallVec::new(),
            count,
        })
    }

    /// The most recently rolled values (empty before the first roll).
    #[must_use]
    pub fn rolled(&self) -> &[u8] {
        &self.rolled
    }
}

impl DiceSource for Dice {
    fn roll_all(&mut self) -> &[u8] {
        self.rolled.clear();
        for _ in 0..self.count {
            self.rolled.push(self.rng.gen_range(1..=6));
        }
        &self.rolled
    }

    fn sum_of_rolled(&self) -> u32 {
        self.rolled.iter().map(|&v| v as u32).sum()
    }

    fn die_count(&self) -> usize {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_dice_rejected() {
        assert!(Dice::new(0, 1).is_err());
    }

    #[test]
    fn test_roll_bounds() {
        let mut dice = Dice::new(3, 7).unwrap();
        for _ in 0..200 {
            for &value in dice.roll_all() {
                assert!((1..=6).contains(&value));
            }
        }
    }

    #[test]
    fn test_sum_matches_recorded_values() {
        let mut dice = Dice::new(4, 99).unwrap();
        for _ in 0..50 {
            let expected: u32 = dice.roll_all().iter().map(|&v| v as u32).sum();
            assert_eq!(dice.sum_of_rolled(), expected);
        }
    }

    #[test]
    fn test_sum_zero_before_first_roll() {
        let dice = Dice::new(2, 0).unwrap();
        assert_eq!(dice.sum_of_rolled(), 0);
        assert!(dice.rolled().is_empty());
    }

    #[test]
    fn test_determinism() {
        let mut a = Dice::new(2, 42).unwrap();
        let mut b = Dice::new(2, 42).unwrap();
        for _ in 0..20 {
            assert_eq!(a.roll_all(), b.roll_all());
        }
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = Dice::new(2, 1).unwrap();
        let mut b = Dice::new(2, 2).unwrap();
        let seq_a: Vec<Vec<u8>> = (0..10).map(|_| a.roll_all().to_vec()).collect();
        let seq_b: Vec<Vec<u8>> = (0..10).map(|_| b.roll_all().to_vec()).collect();
        assert_ne!(seq_a, seq_b);
    }
}

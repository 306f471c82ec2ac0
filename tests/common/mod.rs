//! Shared helpers for integration tests.

use boardkit::DiceSource;

/// Dice that replay a fixed script of rolls, cycling when exhausted.
pub struct FixedDice {
    rolls: Vec<Vec<u8>>,
    cursor: usize,
    last: Vec<u8>,
}

impl FixedDice {
    pub fn new(rolls: Vec<Vec<u8>>) -> Self {
        Self {
            rolls,
            cursor: 0,
            last: Vec::new(),
        }
    }
}

impl DiceSource for FixedDice {
    fn roll_all(&mut self) -> &[u8] {
        self.last = self.rolls[self.cursor % self.rolls.len()].clone();
        self.cursor += 1;
        &self.last
    }

    fn sum_of_rolled(&self) -> u32 {
        self.last.iter().map(|&v| v as u32).sum()
    }

    fn die_count(&self) -> usize {
        self.last.len().max(1)
    }
}

//! Deterministic random number generation and dice.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical rolls and choices
//! - **Forkable**: Independent streams per match in a batch run
//! - **Pluggable dice**: Anything implementing `Dice` can drive a match
//!
//! ```
//! use clovek::core::{Dice, SeededDice};
//!
//! let mut a = SeededDice::new(6, 42);
//! let mut b = SeededDice::new(6, 42);
//!
//! let rolls: Vec<u8> = (0..10).map(|_| a.roll()).collect();
//! assert!(rolls.iter().all(|r| (1..=6).contains(r)));
//! assert_eq!(rolls, (0..10).map(|_| b.roll()).collect::<Vec<_>>());
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic RNG with forking.
///
/// Uses ChaCha8 for speed while keeping a well-distributed stream.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Seed this RNG was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Fork this RNG to create an independent branch.
    ///
    /// Each fork produces a different but deterministic sequence.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self
            .seed
            .wrapping_add(self.fork_counter.wrapping_mul(0x9E3779B97F4A7C15));
        Self::new(fork_seed)
    }

    /// Uniform integer in `1..=faces`.
    pub fn roll_die(&mut self, faces: u8) -> u8 {
        self.inner.gen_range(1..=faces)
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    pub fn gen_index(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }
}

/// Source of die rolls.
///
/// Rolls are uniform integers in `1..=faces()`.
pub trait Dice {
    /// Number of faces (the maximum roll).
    fn faces(&self) -> u8;

    /// Roll once.
    fn roll(&mut self) -> u8;
}

/// Seeded uniform die.
#[derive(Clone, Debug)]
pub struct SeededDice {
    faces: u8,
    rng: GameRng,
}

impl SeededDice {
    /// Create a die with `faces` faces seeded with `seed`.
    #[must_use]
    pub fn new(faces: u8, seed: u64) -> Self {
        Self::from_rng(faces, GameRng::new(seed))
    }

    /// Create a die drawing from an existing RNG stream.
    #[must_use]
    pub fn from_rng(faces: u8, rng: GameRng) -> Self {
        Self { faces, rng }
    }
}

impl Dice for SeededDice {
    fn faces(&self) -> u8 {
        self.faces
    }

    fn roll(&mut self) -> u8 {
        self.rng.roll_die(self.faces)
    }
}

/// Die replaying a fixed roll sequence, cycling when exhausted.
///
/// Used to script matches in tests.
#[derive(Clone, Debug)]
pub struct ScriptedDice {
    faces: u8,
    rolls: Vec<u8>,
    cursor: usize,
}

impl ScriptedDice {
    /// Create a scripted die. `rolls` must be non-empty.
    #[must_use]
    pub fn new(faces: u8, rolls: impl Into<Vec<u8>>) -> Self {
        let rolls = rolls.into();
        assert!(!rolls.is_empty(), "ScriptedDice needs at least one roll");
        Self {
            faces,
            rolls,
            cursor: 0,
        }
    }
}

impl Dice for ScriptedDice {
    fn faces(&self) -> u8 {
        self.faces
    }

    fn roll(&mut self) -> u8 {
        let roll = self.rolls[self.cursor % self.rolls.len()];
        self.cursor += 1;
        roll
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.roll_die(6), rng2.roll_die(6));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = GameRng::new(1);
        let mut rng2 = GameRng::new(2);

        let seq1: Vec<_> = (0..20).map(|_| rng1.gen_index(1000)).collect();
        let seq2: Vec<_> = (0..20).map(|_| rng2.gen_index(1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_fork_is_deterministic() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        let first1 = rng1.fork();
        let first2 = rng2.fork();
        let second1 = rng1.fork();

        assert_eq!(first1.seed(), first2.seed());
        assert_ne!(first1.seed(), second1.seed());
    }

    #[test]
    fn test_roll_covers_all_faces() {
        let mut dice = SeededDice::new(6, 7);
        let mut seen = [false; 6];

        for _ in 0..600 {
            let roll = dice.roll();
            assert!((1..=6).contains(&roll));
            seen[(roll - 1) as usize] = true;
        }

        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_scripted_dice_cycles() {
        let mut dice = ScriptedDice::new(6, vec![6, 1, 3]);

        let rolls: Vec<_> = (0..5).map(|_| dice.roll()).collect();
        assert_eq!(rolls, vec![6, 1, 3, 6, 1]);
        assert_eq!(dice.faces(), 6);
    }

    #[test]
    #[should_panic(expected = "ScriptedDice needs at least one roll")]
    fn test_scripted_dice_empty() {
        let _ = ScriptedDice::new(6, Vec::new());
    }
}

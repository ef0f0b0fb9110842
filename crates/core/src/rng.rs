//! RNG module - uniform random piece generation
//!
//! Each draw picks one of the seven kinds independently and uniformly. There is
//! no bag and no anti-streak rule, so the same kind can come up several times
//! in a row.
//!
//! The generator is seeded so that tests and benchmarks replay the same
//! sequence; the binary seeds it from OS entropy.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::game_state::Piece;
use crate::types::PieceKind;

/// Uniform piece generator
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rng: StdRng,
    seed: u64,
}

impl PieceGenerator {
    /// Create a generator with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a generator seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Draw the next piece kind
    pub fn next_kind(&mut self) -> PieceKind {
        PieceKind::ALL[self.rng.gen_range(0..PieceKind::ALL.len())]
    }

    /// Draw a fresh piece at spawn position in its base orientation
    pub fn random_piece(&mut self) -> Piece {
        Piece::new(self.next_kind())
    }

    /// Seed this generator was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new(1)
    }
}

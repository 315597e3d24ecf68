//! Seeded pseudo-random sampling for shakedown.
//!
//! One scenario = one seed. The generator is an explicit handle passed into
//! the assembler, never ambient global state, so reseeding stays
//! deterministic and testable in isolation.

use rand::Rng;
use rand::SeedableRng;
use rand::seq::IndexedRandom;

/// A reseedable pseudo-random generator with uniform selection over slices.
///
/// Two generators reseeded with the same seed and asked the same sequence of
/// questions (same call order, same slice lengths, same ranges) answer
/// identically. Single-threaded use only.
pub struct SeededRng {
    rng: rand::rngs::StdRng,
}

impl SeededRng {
    /// Create a generator seeded with a fixed seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: rand::rngs::StdRng::seed_from_u64(seed),
        }
    }

    /// Reset the internal state to exactly what `new(seed)` would produce.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = rand::rngs::StdRng::seed_from_u64(seed);
    }

    /// Pick one element uniformly. `None` on an empty slice.
    pub fn pick<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        if slice.is_empty() {
            None
        } else {
            slice.choose(&mut self.rng)
        }
    }

    /// Uniform draw from the inclusive range `[min, max]`.
    pub fn range(&mut self, min: usize, max: usize) -> usize {
        self.rng.random_range(min..=max)
    }

    /// Draw a child scenario seed.
    ///
    /// Kept in `[0, i32::MAX]` so seeds read the same as the non-negative
    /// platform `rand()` values operators already have in old run logs.
    pub fn draw_seed(&mut self) -> u32 {
        self.rng.random_range(0..=i32::MAX as u32)
    }
}

/// One seed drawn from OS entropy, for runs where the operator gave none.
pub fn entropy_seed() -> u32 {
    rand::rng().random_range(0..=i32::MAX as u32)
}

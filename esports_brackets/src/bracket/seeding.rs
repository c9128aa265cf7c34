//! Participant seeding via unbiased shuffling.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Shuffler producing the seeding order for bracket generation
///
/// The random source is owned rather than ambient so callers control it:
/// production uses OS entropy, tests pass a fixed seed and get reproducible
/// orderings. The seed is never stored; regenerating a bracket reshuffles
/// from scratch.
pub struct Shuffler {
    /// Random number generator
    rng: StdRng,
}

impl Shuffler {
    /// Create a shuffler seeded from OS entropy
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Create a shuffler with a fixed seed, for reproducible orderings
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Shuffle items in place, uniformly over all permutations
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}

impl Default for Shuffler {
    fn default() -> Self {
        Self::new()
    }
}

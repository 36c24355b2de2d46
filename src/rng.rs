// Randomness sources for prompt selection and effect spread.

use rand::rngs::{OsRng, SmallRng};
use rand::{Rng, SeedableRng};

pub trait RandomSource {
    /// Uniform index in `0..upper`. Returns 0 when `upper` is 0 or 1.
    fn below(&mut self, upper: usize) -> usize;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn below(&mut self, upper: usize) -> usize {
        if upper <= 1 {
            return 0;
        }
        self.gen_range(0..upper)
    }
}

/// Deterministic generator for tests and cosmetic effects.
pub fn seeded(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

/// Generator seeded from browser / OS entropy, falling back to a fixed seed
/// if the entropy source is unavailable.
pub fn from_entropy() -> SmallRng {
    SmallRng::from_rng(OsRng).unwrap_or_else(|err| {
        log::warn!("entropy unavailable ({}), using seeded fallback", err);
        seeded(0x9E37_79B9_7F4A_7C15)
    })
}

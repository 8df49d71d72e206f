//! Draw source used by the worker outside of tests.

use arena_core::RngSource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// [`RngSource`] backed by `rand`'s standard generator.
pub struct ThreadRolls {
    rng: StdRng,
}

impl ThreadRolls {
    /// Seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible sequence for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RngSource for ThreadRolls {
    fn int_in(&mut self, min: i64, max: i64) -> i64 {
        if min >= max {
            return min;
        }
        self.rng.gen_range(min..=max)
    }

    fn unit(&mut self) -> f64 {
        self.rng.r#gen::<f64>()
    }

    fn float_in(&mut self, min: f64, max: f64) -> f64 {
        if min >= max {
            return min;
        }
        self.rng.gen_range(min..=max)
    }
}

//! Deterministic random number generation.
//!
//! A run owns exactly one generator, seeded once from the scenario seed.

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// The single seeded generator of a simulation run.
pub struct SimRng {
    inner: ChaCha8Rng,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl RngCore for SimRng {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.inner.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.inner.try_fill_bytes(dest)
    }
}

pub trait RngExt {
    /// Uniform value in `[min, max]`. A degenerate range yields `min`.
    fn random_f32(&mut self, min: f32, max: f32) -> f32;

    /// Uniform value in `[-bound, bound]`.
    fn noise(&mut self, bound: f32) -> f32 {
        self.random_f32(-bound, bound)
    }
}

impl<R: Rng> RngExt for R {
    fn random_f32(&mut self, min: f32, max: f32) -> f32 {
        self.gen::<f32>() * (max - min) + min
    }
}

//! Deterministic RNG wrapper for agent sampling.
//!
//! # Determinism strategy
//!
//! The sampler walks OD pairs in matrix order and draws from one `SmallRng`
//! seeded from the configured seed, so a fixed seed always reproduces the
//! same agent table.  Draw order is therefore part of the output contract:
//! origin node, destination node, then departure time, per agent.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Seeded RNG used by the agent sampler.
pub struct DemandRng(SmallRng);

impl DemandRng {
    pub fn new(seed: u64) -> Self {
        DemandRng(SmallRng::seed_from_u64(seed))
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Choose a random element from a slice.
    /// Returns `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}

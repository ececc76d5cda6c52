// skysim_sim/src/simulation/core/prng.rs

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A newtype wrapper around `ChaCha8Rng`.
/// This is the central, deterministic pseudo-random number generator for
/// the simulation; every sensor's noise stream is derived from it.
pub struct SimulationRng(pub ChaCha8Rng);

impl SimulationRng {
    /// Seeded when the scenario pins a seed, from OS entropy otherwise.
    pub fn from_scenario_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self(ChaCha8Rng::seed_from_u64(seed)),
            None => Self(ChaCha8Rng::from_entropy()),
        }
    }

    /// Derives an independent child generator. Each sensor owns one, so
    /// registration order cannot perturb another sensor's noise stream.
    pub fn derive_child(&mut self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.0.next_u64())
    }
}

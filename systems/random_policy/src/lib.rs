#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Seeded baseline policy that picks every agent's action uniformly at random.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use team_catcher_core::{Action, JointAction};

/// Configuration parameters required to construct the random policy.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided seed.
    #[must_use]
    pub const fn new(rng_seed: u64) -> Self {
        Self { rng_seed }
    }
}

/// Pure system that emits one uniformly drawn action per agent.
///
/// The policy owns its generator, so its draws never disturb the world's
/// random stream.
#[derive(Debug)]
pub struct RandomPolicy {
    rng: ChaCha8Rng,
}

impl RandomPolicy {
    /// Creates a new policy using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Overwrites `out` with a fresh joint action for `nb_agents` agents.
    pub fn handle(&mut self, nb_agents: u32, out: &mut JointAction) {
        *out = JointAction::from_fn(nb_agents, |_| self.next_action());
    }

    fn next_action(&mut self) -> Action {
        Action::ALL[self.rng.gen_range(0..Action::COUNT)]
    }
}

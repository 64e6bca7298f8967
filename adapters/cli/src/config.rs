//! Run configuration loaded from TOML and overridden by command-line flags.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;
use team_catcher_core::WorldConfig;

/// Episodes played when neither the file nor the flags say otherwise.
pub(crate) const DEFAULT_EPISODES: u32 = 1;

/// Step cap per episode when neither the file nor the flags say otherwise.
pub(crate) const DEFAULT_MAX_STEPS: u64 = 10_000;

/// Everything needed to drive a batch of episodes.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct RunConfig {
    /// World construction parameters.
    pub(crate) world: WorldConfig,
    /// Number of episodes to play.
    pub(crate) episodes: u32,
    /// Step cap applied to every episode.
    pub(crate) max_steps: u64,
    /// Seed of the random policy; the world seed is reused when absent.
    pub(crate) policy_seed: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            episodes: DEFAULT_EPISODES,
            max_steps: DEFAULT_MAX_STEPS,
            policy_seed: None,
        }
    }
}

impl RunConfig {
    /// Reads and parses the TOML run configuration stored at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read run configuration {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("failed to load run configuration {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse run configuration toml contents")
    }
}

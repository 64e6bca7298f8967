#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays Team Catcher episodes with a random policy.

mod config;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use team_catcher_core::JointAction;
use team_catcher_env::{ActionMapping, TeamCatcher};
use team_catcher_system_random_policy::{Config as PolicyConfig, RandomPolicy};
use team_catcher_world::query;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::config::RunConfig;

const DEFAULT_LOG_FILTER: &str = "team_catcher=info,warn";

/// Plays Team Catcher episodes driven by a seeded random policy.
#[derive(Parser, Debug)]
#[command(name = "team-catcher", version)]
struct CliArgs {
    /// TOML run configuration; flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Side length of the square grid.
    #[arg(long)]
    grid_size: Option<u32>,
    /// Number of agents.
    #[arg(long)]
    agents: Option<u32>,
    /// Number of stationary targets.
    #[arg(long)]
    targets: Option<u32>,
    /// Number of mobiles.
    #[arg(long)]
    mobiles: Option<u32>,
    /// Seed of the world's random number generator.
    #[arg(long)]
    seed: Option<u64>,
    /// Seed of the random policy.
    #[arg(long)]
    policy_seed: Option<u64>,
    /// Number of episodes to play (default 1).
    #[arg(long)]
    episodes: Option<u32>,
    /// Step cap per episode (default 10000).
    #[arg(long)]
    max_steps: Option<u64>,
}

impl CliArgs {
    fn resolve(self) -> Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::load(path)?,
            None => RunConfig::default(),
        };

        let world = &mut config.world;
        world.grid_size = self.grid_size.unwrap_or(world.grid_size);
        world.nb_agents = self.agents.unwrap_or(world.nb_agents);
        world.nb_targets = self.targets.unwrap_or(world.nb_targets);
        world.nb_mobiles = self.mobiles.unwrap_or(world.nb_mobiles);
        world.seed = self.seed.or(world.seed);
        config.policy_seed = self.policy_seed.or(config.policy_seed);
        config.episodes = self.episodes.unwrap_or(config.episodes);
        config.max_steps = self.max_steps.unwrap_or(config.max_steps);
        Ok(config)
    }
}

/// Totals gathered over one episode.
#[derive(Clone, Copy, Debug, Default)]
struct EpisodeSummary {
    steps: u64,
    reward: u64,
    targets_captured: u32,
    mobiles_captured: u32,
    cleared: bool,
}

/// Entry point for the Team Catcher command-line interface.
fn main() -> Result<()> {
    init_logging()?;
    let config = CliArgs::parse().resolve()?;

    let mut env =
        TeamCatcher::new(config.world.clone()).context("invalid world configuration")?;
    let world_seed = query::seed(env.world());
    let policy_seed = config.policy_seed.unwrap_or(world_seed);
    let mut policy = RandomPolicy::new(PolicyConfig::new(policy_seed));
    info!(world_seed, policy_seed, episodes = config.episodes, "starting run");

    for episode in 1..=config.episodes {
        let summary = run_episode(&mut env, &mut policy, config.max_steps)?;
        println!(
            "episode {episode}: steps={} reward={} targets_captured={}/{} \
             mobiles_captured={}/{} cleared={}",
            summary.steps,
            summary.reward,
            summary.targets_captured,
            config.world.nb_targets,
            summary.mobiles_captured,
            config.world.nb_mobiles,
            summary.cleared,
        );
    }

    Ok(())
}

fn run_episode(
    env: &mut TeamCatcher,
    policy: &mut RandomPolicy,
    max_steps: u64,
) -> Result<EpisodeSummary> {
    let nb_agents = query::config(env.world()).nb_agents;
    let _ = env.reset();

    let mut summary = EpisodeSummary::default();
    let mut actions = JointAction::default();
    while summary.steps < max_steps && !summary.cleared {
        policy.handle(nb_agents, &mut actions);
        let mapping: ActionMapping = actions
            .iter()
            .map(|(agent, action)| (agent.key(), action.code()))
            .collect();
        let transition = env.step(&mapping).context("policy produced a rejected step")?;

        summary.steps = transition.info.step;
        summary.reward += u64::from(transition.reward);
        summary.cleared = transition.done;
    }

    let captures = env.episode_captures();
    summary.targets_captured = captures.targets;
    summary.mobiles_captured = captures.mobiles;
    Ok(summary)
}

fn init_logging() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Team Catcher.
//!
//! The [`World`] owns the grid, every entity, the step counter and its own
//! random number generator. A step runs the action resolver, then mobile
//! motion, then capture detection, always in that order, so two worlds
//! built from the same configuration and seed and fed the same joint
//! actions produce identical trajectories.

mod capture;
mod grid;
mod mobiles;
mod placement;
mod resolver;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use team_catcher_core::{
    AgentId, Captures, CellCoord, ConfigurationError, Event, JointAction, Layout, MapElement,
    MobileId, Observation, Population, StepError, TargetId, WorldConfig,
};
use tracing::{debug, info};

use crate::grid::OccupancyGrid;

/// Represents the authoritative Team Catcher world state.
#[derive(Debug)]
pub struct World {
    config: WorldConfig,
    population: Population,
    seed: u64,
    rng: ChaCha8Rng,
    grid: OccupancyGrid,
    agents: Vec<Agent>,
    targets: Vec<Target>,
    mobiles: Vec<Mobile>,
    targets_alive: u32,
    mobiles_alive: u32,
    step_index: u64,
    episode_index: u64,
}

impl World {
    /// Creates a world with a randomly sampled initial placement.
    ///
    /// Fails before any state is built when the configuration is invalid,
    /// most notably when the population exceeds `(grid_size - 1)^2`.
    pub fn new(config: WorldConfig) -> Result<Self, ConfigurationError> {
        let population = config.validate()?;
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let layout = placement::sample_layout(config.grid_size, population, &mut rng);
        Ok(Self::assemble(config, population, seed, rng, layout))
    }

    /// Creates a world whose initial placement is given explicitly.
    ///
    /// The random number generator is still seeded from the configuration
    /// and drives mobile motion and every later [`World::reset`].
    pub fn with_layout(config: WorldConfig, layout: Layout) -> Result<Self, ConfigurationError> {
        let population = config.validate()?;
        placement::validate_layout(config.grid_size, population, &layout)?;
        let seed = config.seed.unwrap_or_else(rand::random);
        let rng = ChaCha8Rng::seed_from_u64(seed);
        Ok(Self::assemble(config, population, seed, rng, layout))
    }

    fn assemble(
        config: WorldConfig,
        population: Population,
        seed: u64,
        rng: ChaCha8Rng,
        layout: Layout,
    ) -> Self {
        let mut world = Self {
            grid: OccupancyGrid::new(config.grid_size),
            config,
            population,
            seed,
            rng,
            agents: Vec::new(),
            targets: Vec::new(),
            mobiles: Vec::new(),
            targets_alive: 0,
            mobiles_alive: 0,
            step_index: 0,
            episode_index: 0,
        };
        world.populate(layout);
        world
    }

    fn populate(&mut self, layout: Layout) {
        self.agents = layout
            .agents
            .into_iter()
            .enumerate()
            .map(|(index, cell)| Agent {
                id: AgentId::from_index(index as u32),
                cell,
            })
            .collect();
        self.targets = layout
            .targets
            .into_iter()
            .enumerate()
            .map(|(index, cell)| Target {
                id: TargetId::new(index as u32 + 1),
                cell,
                alive: true,
            })
            .collect();
        self.mobiles = layout
            .mobiles
            .into_iter()
            .enumerate()
            .map(|(index, cell)| Mobile {
                id: MobileId::new(index as u32 + 1),
                cell,
                alive: true,
            })
            .collect();

        self.grid.clear();
        for agent in &self.agents {
            self.grid.occupy(MapElement::Agent, agent.cell);
        }
        for target in &self.targets {
            self.grid.occupy(MapElement::Target, target.cell);
        }
        for mobile in &self.mobiles {
            self.grid.occupy(MapElement::Mobile, mobile.cell);
        }

        self.targets_alive = self.population.targets;
        self.mobiles_alive = self.population.mobiles;
        self.step_index = 0;
    }

    /// Starts a new episode with a freshly sampled placement.
    ///
    /// The generator is not reseeded, so consecutive episodes differ while
    /// remaining a deterministic function of the initial seed.
    pub fn reset(&mut self) -> Observation {
        let layout =
            placement::sample_layout(self.config.grid_size, self.population, &mut self.rng);
        self.populate(layout);
        self.episode_index = self.episode_index.saturating_add(1);
        info!(
            episode = self.episode_index,
            seed = self.seed,
            agents = self.population.agents,
            targets = self.population.targets,
            mobiles = self.population.mobiles,
            "episode reset"
        );
        self.export_state()
    }

    /// Advances the world by one step.
    ///
    /// The joint action is checked against the world's agents before any
    /// state changes; a rejected call leaves the world untouched. Events
    /// describing the step are appended to `out_events`.
    pub fn update(
        &mut self,
        actions: &JointAction,
        out_events: &mut Vec<Event>,
    ) -> Result<Captures, StepError> {
        if actions.len() != self.agents.len() {
            return Err(ConfigurationError::AgentCountMismatch {
                expected: self.population.agents,
                supplied: actions.len(),
            }
            .into());
        }

        let policies = self.config.policies;
        resolver::resolve_agent_moves(
            &mut self.agents,
            &mut self.grid,
            actions,
            policies.resolution_order,
            out_events,
        );
        mobiles::advance_mobiles(
            &mut self.mobiles,
            &mut self.grid,
            policies.mobile_motion,
            &mut self.rng,
            out_events,
        );
        let captures = capture::detect_captures(
            &mut self.targets,
            &mut self.mobiles,
            &mut self.grid,
            &policies,
            out_events,
        );

        self.targets_alive = self.targets_alive.saturating_sub(captures.targets);
        self.mobiles_alive = self.mobiles_alive.saturating_sub(captures.mobiles);
        self.step_index = self.step_index.saturating_add(1);
        out_events.push(Event::StepCompleted {
            step: self.step_index,
            captures,
        });
        debug!(
            step = self.step_index,
            captured_targets = captures.targets,
            captured_mobiles = captures.mobiles,
            targets_alive = self.targets_alive,
            "step resolved"
        );

        Ok(captures)
    }

    /// Exports the grid and agent positions as an [`Observation`].
    #[must_use]
    pub fn export_state(&self) -> Observation {
        Observation::new(
            self.grid.size(),
            self.grid.elements().collect(),
            self.agents.iter().map(|agent| agent.cell).collect(),
        )
    }

    /// Number of targets still on the grid in the current episode.
    #[must_use]
    pub fn targets_alive(&self) -> u32 {
        self.targets_alive
    }

    /// Replaces the world's random number generator with one seeded from `seed`.
    ///
    /// Takes effect from the next random draw; call [`World::reset`] to
    /// start an episode from the new seed.
    pub fn reseed(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use team_catcher_core::{
        AgentSnapshot, CellCoord, MapElement, MobileSnapshot, TargetSnapshot, WorldConfig,
    };

    use super::World;

    /// Configuration the world was built from.
    #[must_use]
    pub fn config(world: &World) -> &WorldConfig {
        &world.config
    }

    /// Seed currently driving the world's random number generator.
    ///
    /// When the configuration left the seed open this reports the value
    /// drawn from entropy, so the run can be reproduced.
    #[must_use]
    pub fn seed(world: &World) -> u64 {
        world.seed
    }

    /// Number of mobiles still on the grid in the current episode.
    #[must_use]
    pub fn mobiles_alive(world: &World) -> u32 {
        world.mobiles_alive
    }

    /// Number of steps resolved since the last reset.
    #[must_use]
    pub fn step_index(world: &World) -> u64 {
        world.step_index
    }

    /// Number of resets performed since construction.
    #[must_use]
    pub fn episode_index(world: &World) -> u64 {
        world.episode_index
    }

    /// Reports whether every target of the episode has been captured.
    #[must_use]
    pub fn is_terminal(world: &World) -> bool {
        world.targets_alive == 0
    }

    /// Element occupying `cell`, or `None` outside the grid.
    #[must_use]
    pub fn element_at(world: &World, cell: CellCoord) -> Option<MapElement> {
        world.grid.element(cell)
    }

    /// Captures the agents in ascending id order.
    #[must_use]
    pub fn agent_snapshots(world: &World) -> Vec<AgentSnapshot> {
        world
            .agents
            .iter()
            .map(|agent| AgentSnapshot {
                id: agent.id,
                cell: agent.cell,
            })
            .collect()
    }

    /// Captures every target of the episode, captured ones included.
    #[must_use]
    pub fn target_snapshots(world: &World) -> Vec<TargetSnapshot> {
        world
            .targets
            .iter()
            .map(|target| TargetSnapshot {
                id: target.id,
                cell: target.cell,
                alive: target.alive,
            })
            .collect()
    }

    /// Captures every mobile of the episode, captured ones included.
    #[must_use]
    pub fn mobile_snapshots(world: &World) -> Vec<MobileSnapshot> {
        world
            .mobiles
            .iter()
            .map(|mobile| MobileSnapshot {
                id: mobile.id,
                cell: mobile.cell,
                alive: mobile.alive,
            })
            .collect()
    }
}

#[derive(Clone, Debug)]
struct Agent {
    id: AgentId,
    cell: CellCoord,
}

#[derive(Clone, Debug)]
struct Target {
    id: TargetId,
    cell: CellCoord,
    alive: bool,
}

#[derive(Clone, Debug)]
struct Mobile {
    id: MobileId,
    cell: CellCoord,
    alive: bool,
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Multi-agent environment adapter wrapping the Team Catcher world.
//!
//! Actions arrive as a mapping from `agent_<i>` keys to numeric codes and
//! are validated as a whole before the world is touched. Each step reports
//! the new observation, the reward earned by the captures of that step, and
//! whether every target has been caught.

use std::{collections::BTreeMap, ops::RangeInclusive};

use team_catcher_core::{
    Action, AgentId, Captures, ConfigurationError, Event, JointAction, MapElement, Observation,
    StepError, WorldConfig,
};
use team_catcher_world::{query, World};
use tracing::debug;

/// Reward granted for every captured target.
pub const TARGET_REWARD: u32 = 1;

/// Reward granted for every captured mobile.
pub const MOBILE_REWARD: u32 = 2;

/// Per-agent action codes keyed `agent_<i>`.
pub type ActionMapping = BTreeMap<String, u8>;

/// Auxiliary diagnostics attached to every transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepInfo {
    /// Number of steps resolved in the current episode, this one included.
    pub step: u64,
    /// Number of targets still on the grid.
    pub targets_alive: u32,
}

/// Outcome of a single environment step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    /// World state after the step.
    pub observation: Observation,
    /// Reward earned by the captures of this step.
    pub reward: u32,
    /// Whether every target of the episode has been captured.
    pub done: bool,
    /// Diagnostics describing the step.
    pub info: StepInfo,
}

/// Describes the discrete action space of every agent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionSpace {
    /// Keys of the agents expecting an action, in ascending id order.
    pub agents: Vec<String>,
    /// Number of action codes available to each agent.
    pub choices: usize,
}

/// Describes the shape and value ranges of an [`Observation`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObservationSpace {
    /// Map dimensions as `(rows, columns)`.
    pub map_shape: (u32, u32),
    /// Range of the numeric map element values.
    pub element_values: RangeInclusive<u8>,
    /// Range of each agent coordinate.
    pub coordinates: RangeInclusive<u32>,
    /// Keys of the agents whose positions are reported.
    pub agents: Vec<String>,
}

/// Computes the reward earned by a set of captures.
#[must_use]
pub const fn compute_reward(captures: Captures) -> u32 {
    captures.targets * TARGET_REWARD + captures.mobiles * MOBILE_REWARD
}

/// Reports whether an episode with `targets_alive` remaining targets has ended.
#[must_use]
pub const fn episode_end(targets_alive: u32) -> bool {
    targets_alive == 0
}

/// Translates an [`ActionMapping`] into a dense joint action.
///
/// Every agent must be named exactly once by its canonical key and every
/// code must name an [`Action`].
pub fn joint_action(nb_agents: u32, mapping: &ActionMapping) -> Result<JointAction, StepError> {
    let codes = mapping
        .iter()
        .map(|(key, code)| {
            AgentId::from_key(key)
                .map(|agent| (agent, *code))
                .ok_or_else(|| ConfigurationError::UnknownAgent(key.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    JointAction::from_codes(nb_agents, codes)
}

/// Environment driving a [`World`] through the keyed multi-agent interface.
#[derive(Debug)]
pub struct TeamCatcher {
    world: World,
    events: Vec<Event>,
    episode_captures: Captures,
}

impl TeamCatcher {
    /// Creates an environment around a freshly validated world.
    pub fn new(config: WorldConfig) -> Result<Self, ConfigurationError> {
        World::new(config).map(Self::from_world)
    }

    /// Wraps an existing world, keeping its current placement.
    #[must_use]
    pub fn from_world(world: World) -> Self {
        Self {
            world,
            events: Vec::new(),
            episode_captures: Captures::default(),
        }
    }

    /// Starts a new episode and returns its initial observation.
    pub fn reset(&mut self) -> Observation {
        self.events.clear();
        self.episode_captures = Captures::default();
        self.world.reset()
    }

    /// Applies one action per agent and advances the world by one step.
    ///
    /// A rejected mapping leaves the world untouched.
    pub fn step(&mut self, mapping: &ActionMapping) -> Result<Transition, StepError> {
        let actions = joint_action(self.nb_agents(), mapping)?;
        self.events.clear();
        let captures = self.world.update(&actions, &mut self.events)?;
        self.episode_captures += captures;

        let targets_alive = self.world.targets_alive();
        let done = episode_end(targets_alive);
        if done {
            debug!(
                episode = query::episode_index(&self.world),
                steps = query::step_index(&self.world),
                captured_mobiles = self.episode_captures.mobiles,
                "all targets captured"
            );
        }

        Ok(Transition {
            observation: self.world.export_state(),
            reward: compute_reward(captures),
            done,
            info: StepInfo {
                step: query::step_index(&self.world),
                targets_alive,
            },
        })
    }

    /// Events emitted by the most recent step.
    #[must_use]
    pub fn last_events(&self) -> &[Event] {
        &self.events
    }

    /// Captures accumulated since the last reset.
    #[must_use]
    pub fn episode_captures(&self) -> Captures {
        self.episode_captures
    }

    /// Read-only access to the wrapped world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Describes the action codes accepted by [`TeamCatcher::step`].
    #[must_use]
    pub fn action_space(&self) -> ActionSpace {
        ActionSpace {
            agents: self.agent_keys(),
            choices: Action::COUNT,
        }
    }

    /// Describes the observations produced by the environment.
    #[must_use]
    pub fn observation_space(&self) -> ObservationSpace {
        let grid_size = query::config(&self.world).grid_size;
        ObservationSpace {
            map_shape: (grid_size, grid_size),
            element_values: MapElement::Empty.value()..=MapElement::Mobile.value(),
            coordinates: 0..=grid_size.saturating_sub(1),
            agents: self.agent_keys(),
        }
    }

    fn nb_agents(&self) -> u32 {
        query::config(&self.world).nb_agents
    }

    fn agent_keys(&self) -> Vec<String> {
        (0..self.nb_agents())
            .map(|index| AgentId::from_index(index).key())
            .collect()
    }
}

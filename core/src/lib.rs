#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Team Catcher engine.
//!
//! This crate defines the vocabulary that connects adapters, the
//! authoritative world, and pure systems. Adapters hand the world a
//! [`JointAction`] carrying exactly one [`Action`] per agent, the world
//! resolves the step and reports [`Captures`] alongside a stream of
//! [`Event`] values, and anyone holding the world may export an
//! [`Observation`] describing the grid. Nothing in here owns simulation
//! state.

use std::{collections::BTreeMap, fmt, ops::AddAssign};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest accepted grid side length; the dense map holds `grid_size^2` cells.
pub const MAX_GRID_SIZE: u32 = 4096;

/// Prefix used when agents are addressed through keyed mappings.
pub const AGENT_KEY_PREFIX: &str = "agent_";

/// Discrete action an agent may take during a single step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Stay in place.
    Noop,
    /// Move one cell toward decreasing `y`.
    Up,
    /// Move one cell toward increasing `y`.
    Down,
    /// Move one cell toward decreasing `x`.
    Left,
    /// Move one cell toward increasing `x`.
    Right,
}

impl Action {
    /// Number of distinct actions available to an agent.
    pub const COUNT: usize = 5;

    /// Every action ordered by its numeric code.
    pub const ALL: [Action; Action::COUNT] = [
        Action::Noop,
        Action::Up,
        Action::Down,
        Action::Left,
        Action::Right,
    ];

    /// Decodes the numeric action code used on the adapter boundary.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Noop),
            1 => Some(Self::Up),
            2 => Some(Self::Down),
            3 => Some(Self::Left),
            4 => Some(Self::Right),
            _ => None,
        }
    }

    /// Numeric code of the action on the adapter boundary.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Noop => 0,
            Self::Up => 1,
            Self::Down => 2,
            Self::Left => 3,
            Self::Right => 4,
        }
    }

    /// Unit displacement `(dx, dy)` applied by the action.
    #[must_use]
    pub const fn displacement(self) -> (i32, i32) {
        match self {
            Self::Noop => (0, 0),
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// Tag describing what occupies a grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapElement {
    /// Nothing occupies the cell.
    #[default]
    Empty,
    /// An agent occupies the cell.
    Agent,
    /// A live target occupies the cell.
    Target,
    /// A live mobile occupies the cell.
    Mobile,
}

impl MapElement {
    /// Numeric value written into exported maps.
    #[must_use]
    pub const fn value(self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::Agent => 1,
            Self::Target => 2,
            Self::Mobile => 3,
        }
    }
}

/// Unique identifier assigned to an agent, dense in `1..=nb_agents`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(u32);

impl AgentId {
    /// Creates a new agent identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Creates the identifier of the agent stored at the zero-based `index`.
    #[must_use]
    pub const fn from_index(index: u32) -> Self {
        Self(index.saturating_add(1))
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Zero-based slot of the agent inside dense per-agent arrays.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.0.saturating_sub(1) as usize
    }

    /// Key naming the agent in keyed mappings, e.g. `agent_3`.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{AGENT_KEY_PREFIX}{}", self.0)
    }

    /// Parses a canonical `agent_<i>` key.
    ///
    /// Keys with leading zeros, signs, or a zero index are rejected so that
    /// every agent has exactly one spelling.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        let digits = key.strip_prefix(AGENT_KEY_PREFIX)?;
        let value: u32 = digits.parse().ok()?;
        if value == 0 || value.to_string() != digits {
            return None;
        }
        Some(Self(value))
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{AGENT_KEY_PREFIX}{}", self.0)
    }
}

/// Unique identifier assigned to a target, dense in `1..=nb_targets`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TargetId(u32);

impl TargetId {
    /// Creates a new target identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a mobile, dense in `1..=nb_mobiles`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MobileId(u32);

impl MobileId {
    /// Creates a new mobile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location of a single grid cell expressed as `(x, y)` coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    x: u32,
    y: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Zero-based column of the cell.
    #[must_use]
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Zero-based row of the cell.
    #[must_use]
    pub const fn y(&self) -> u32 {
        self.y
    }

    /// Reports whether the cell lies inside an `grid_size`×`grid_size` grid.
    #[must_use]
    pub const fn is_within(&self, grid_size: u32) -> bool {
        self.x < grid_size && self.y < grid_size
    }

    /// Returns the cell displaced by `(dx, dy)` when it stays inside the grid.
    #[must_use]
    pub fn offset(self, (dx, dy): (i32, i32), grid_size: u32) -> Option<CellCoord> {
        let x = i64::from(self.x) + i64::from(dx);
        let y = i64::from(self.y) + i64::from(dy);
        let bound = i64::from(grid_size);
        if x < 0 || y < 0 || x >= bound || y >= bound {
            return None;
        }
        Some(CellCoord::new(u32::try_from(x).ok()?, u32::try_from(y).ok()?))
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

const VON_NEUMANN_OFFSETS: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

const MOORE_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Neighbourhood used when counting agents around a capturable entity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Neighborhood {
    /// The four cardinal neighbours.
    #[default]
    VonNeumann,
    /// The four cardinal neighbours plus the four diagonals.
    Moore,
}

impl Neighborhood {
    /// Displacements `(dx, dy)` that make up the neighbourhood.
    #[must_use]
    pub fn offsets(self) -> &'static [(i32, i32)] {
        match self {
            Self::VonNeumann => &VON_NEUMANN_OFFSETS,
            Self::Moore => &MOORE_OFFSETS,
        }
    }
}

/// Motion policy applied to live mobiles once per step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MobileMotion {
    /// Step to a uniformly chosen free cardinal neighbour, staying put when boxed in.
    #[default]
    RandomWalk,
    /// Never move.
    Static,
}

/// Priority used when several agents contend for the same cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionOrder {
    /// Lower agent identifiers commit first.
    #[default]
    AscendingId,
    /// Higher agent identifiers commit first.
    DescendingId,
}

/// Policy knobs for the behaviours that vary between game variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// How mobiles move each step.
    pub mobile_motion: MobileMotion,
    /// Which cells count as adjacent for captures.
    pub capture_neighborhood: Neighborhood,
    /// Order in which contending agent moves are committed.
    pub resolution_order: ResolutionOrder,
    /// Number of adjacent agents required to capture an entity.
    pub capture_threshold: u32,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            mobile_motion: MobileMotion::RandomWalk,
            capture_neighborhood: Neighborhood::VonNeumann,
            resolution_order: ResolutionOrder::AscendingId,
            capture_threshold: 2,
        }
    }
}

/// Construction parameters of a world.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Side length of the square grid.
    pub grid_size: u32,
    /// Number of agents placed at every reset.
    pub nb_agents: u32,
    /// Number of stationary targets placed at every reset.
    pub nb_targets: u32,
    /// Number of mobiles placed at every reset.
    pub nb_mobiles: u32,
    /// Seed for the world's random number generator; drawn from entropy when absent.
    pub seed: Option<u64>,
    /// Behavioural policy knobs.
    pub policies: PolicyConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            grid_size: 64,
            nb_agents: 256,
            nb_targets: 128,
            nb_mobiles: 32,
            seed: None,
            policies: PolicyConfig::default(),
        }
    }
}

impl WorldConfig {
    /// Creates a configuration with default policies and no fixed seed.
    #[must_use]
    pub fn new(grid_size: u32, nb_agents: u32, nb_targets: u32, nb_mobiles: u32) -> Self {
        Self {
            grid_size,
            nb_agents,
            nb_targets,
            nb_mobiles,
            ..Self::default()
        }
    }

    /// Fixes the seed used by the world's random number generator.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replaces the behavioural policy knobs.
    #[must_use]
    pub fn with_policies(mut self, policies: PolicyConfig) -> Self {
        self.policies = policies;
        self
    }

    /// Maximum population the grid accepts: `(grid_size - 1)^2`.
    #[must_use]
    pub fn capacity(&self) -> u64 {
        let side = u64::from(self.grid_size.saturating_sub(1));
        side * side
    }

    /// Validates the configuration, returning the requested population.
    pub fn validate(&self) -> Result<Population, ConfigurationError> {
        if self.grid_size == 0 {
            return Err(ConfigurationError::EmptyGrid);
        }
        if self.grid_size > MAX_GRID_SIZE {
            return Err(ConfigurationError::GridTooLarge {
                grid_size: self.grid_size,
                max: MAX_GRID_SIZE,
            });
        }
        if self.policies.capture_threshold == 0 {
            return Err(ConfigurationError::InvalidCaptureThreshold);
        }

        let population = Population {
            agents: self.nb_agents,
            targets: self.nb_targets,
            mobiles: self.nb_mobiles,
        };
        let capacity = self.capacity();
        if population.total() > capacity {
            return Err(ConfigurationError::PopulationExceedsCapacity {
                population: population.total(),
                capacity,
            });
        }
        Ok(population)
    }
}

/// Validated entity counts of a world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Population {
    /// Number of agents.
    pub agents: u32,
    /// Number of targets.
    pub targets: u32,
    /// Number of mobiles.
    pub mobiles: u32,
}

impl Population {
    /// Total number of entities.
    #[must_use]
    pub fn total(&self) -> u64 {
        u64::from(self.agents) + u64::from(self.targets) + u64::from(self.mobiles)
    }
}

/// Explicit placement of every entity, used for scripted scenarios.
///
/// Position `i` of each vector belongs to the entity with identifier `i + 1`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Layout {
    /// Cells of the agents.
    pub agents: Vec<CellCoord>,
    /// Cells of the targets.
    pub targets: Vec<CellCoord>,
    /// Cells of the mobiles.
    pub mobiles: Vec<CellCoord>,
}

/// One action per agent, stored densely by agent identifier.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct JointAction {
    actions: Vec<Action>,
}

impl JointAction {
    /// Creates a joint action in which every agent stays in place.
    #[must_use]
    pub fn idle(nb_agents: u32) -> Self {
        Self {
            actions: vec![Action::Noop; nb_agents as usize],
        }
    }

    /// Wraps a dense vector whose slot `i` belongs to agent `i + 1`.
    #[must_use]
    pub fn from_actions(actions: Vec<Action>) -> Self {
        Self { actions }
    }

    /// Builds a joint action by asking `choose` for every agent in id order.
    #[must_use]
    pub fn from_fn<F>(nb_agents: u32, mut choose: F) -> Self
    where
        F: FnMut(AgentId) -> Action,
    {
        Self {
            actions: (0..nb_agents)
                .map(|index| choose(AgentId::from_index(index)))
                .collect(),
        }
    }

    /// Builds a joint action from numeric codes, validating the whole set.
    ///
    /// Every agent in `1..=nb_agents` must appear exactly once and every code
    /// must name an [`Action`]. Nothing is returned unless the full set is
    /// valid.
    pub fn from_codes<I>(nb_agents: u32, codes: I) -> Result<Self, StepError>
    where
        I: IntoIterator<Item = (AgentId, u8)>,
    {
        let mut slots: Vec<Option<Action>> = vec![None; nb_agents as usize];
        for (agent, code) in codes {
            let Some(slot) = slots
                .get_mut(agent.index())
                .filter(|_| agent.get() != 0)
            else {
                return Err(ConfigurationError::UnknownAgent(agent.key()).into());
            };
            if slot.is_some() {
                return Err(ConfigurationError::DuplicateAgent(agent).into());
            }
            let action =
                Action::from_code(code).ok_or(InvalidActionError { agent, code })?;
            *slot = Some(action);
        }

        let mut actions = Vec::with_capacity(slots.len());
        for (index, slot) in slots.into_iter().enumerate() {
            match slot {
                Some(action) => actions.push(action),
                None => {
                    let agent = AgentId::from_index(index as u32);
                    return Err(ConfigurationError::MissingAgent(agent).into());
                }
            }
        }
        Ok(Self { actions })
    }

    /// Number of agents covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Reports whether no agent is covered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Action assigned to `agent`, if the agent is covered.
    #[must_use]
    pub fn get(&self, agent: AgentId) -> Option<Action> {
        if agent.get() == 0 {
            return None;
        }
        self.actions.get(agent.index()).copied()
    }

    /// Iterator over `(agent, action)` pairs in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (AgentId, Action)> + '_ {
        self.actions
            .iter()
            .enumerate()
            .map(|(index, action)| (AgentId::from_index(index as u32), *action))
    }
}

/// Number of entities captured during a step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Captures {
    /// Targets captured.
    pub targets: u32,
    /// Mobiles captured.
    pub mobiles: u32,
}

impl Captures {
    /// Reports whether nothing was captured.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.targets == 0 && self.mobiles == 0
    }
}

impl AddAssign for Captures {
    fn add_assign(&mut self, other: Self) {
        self.targets += other.targets;
        self.mobiles += other.mobiles;
    }
}

/// Reasons an agent's requested move did not happen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockReason {
    /// The move would have left the grid.
    Boundary,
    /// The destination cell was already occupied.
    Occupied,
}

/// Events broadcast by the world while resolving a step.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    /// Confirms that an agent moved between two cells.
    AgentMoved {
        /// Agent that moved.
        agent: AgentId,
        /// Cell occupied before the move.
        from: CellCoord,
        /// Cell occupied after the move.
        to: CellCoord,
    },
    /// Reports that an agent asked to move but stayed in place.
    AgentBlocked {
        /// Agent whose move was rejected.
        agent: AgentId,
        /// Cell the agent still occupies.
        at: CellCoord,
        /// Why the move was rejected.
        reason: BlockReason,
    },
    /// Confirms that a mobile moved between two cells.
    MobileMoved {
        /// Mobile that moved.
        mobile: MobileId,
        /// Cell occupied before the move.
        from: CellCoord,
        /// Cell occupied after the move.
        to: CellCoord,
    },
    /// Announces that a target was captured and removed from the grid.
    TargetCaptured {
        /// Captured target.
        target: TargetId,
        /// Cell the target occupied.
        at: CellCoord,
    },
    /// Announces that a mobile was captured and removed from the grid.
    MobileCaptured {
        /// Captured mobile.
        mobile: MobileId,
        /// Cell the mobile occupied.
        at: CellCoord,
    },
    /// Closes the event stream of a step.
    StepCompleted {
        /// Index of the step that finished, starting at 1 within an episode.
        step: u64,
        /// Captures made during the step.
        captures: Captures,
    },
}

/// Immutable representation of a single agent's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AgentSnapshot {
    /// Identifier of the agent.
    pub id: AgentId,
    /// Cell currently occupied by the agent.
    pub cell: CellCoord,
}

/// Immutable representation of a single target's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TargetSnapshot {
    /// Identifier of the target.
    pub id: TargetId,
    /// Cell the target occupies, or occupied when it was captured.
    pub cell: CellCoord,
    /// Whether the target is still on the grid.
    pub alive: bool,
}

/// Immutable representation of a single mobile's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MobileSnapshot {
    /// Identifier of the mobile.
    pub id: MobileId,
    /// Cell the mobile occupies, or occupied when it was captured.
    pub cell: CellCoord,
    /// Whether the mobile is still on the grid.
    pub alive: bool,
}

/// Outward view of the world consumed by adapters.
///
/// The map is stored row-major: the element at `(x, y)` lives at index
/// `y * grid_size + x`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Observation {
    grid_size: u32,
    map: Vec<MapElement>,
    agent_positions: Vec<CellCoord>,
}

impl Observation {
    /// Assembles an observation from a row-major map and dense agent positions.
    #[must_use]
    pub fn new(grid_size: u32, map: Vec<MapElement>, agent_positions: Vec<CellCoord>) -> Self {
        Self {
            grid_size,
            map,
            agent_positions,
        }
    }

    /// Side length of the observed grid.
    #[must_use]
    pub const fn grid_size(&self) -> u32 {
        self.grid_size
    }

    /// Row-major slice of map elements.
    #[must_use]
    pub fn map(&self) -> &[MapElement] {
        &self.map
    }

    /// Element at `cell`, or `None` outside the grid.
    #[must_use]
    pub fn element(&self, cell: CellCoord) -> Option<MapElement> {
        if !cell.is_within(self.grid_size) {
            return None;
        }
        let index = cell.y() as usize * self.grid_size as usize + cell.x() as usize;
        self.map.get(index).copied()
    }

    /// Iterator over the rows of the map, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[MapElement]> {
        self.map.chunks((self.grid_size as usize).max(1))
    }

    /// Map rendered as numeric values, indexed `[y][x]`.
    #[must_use]
    pub fn to_values(&self) -> Vec<Vec<u8>> {
        self.rows()
            .map(|row| row.iter().map(|element| element.value()).collect())
            .collect()
    }

    /// Number of cells holding `element`.
    #[must_use]
    pub fn count(&self, element: MapElement) -> usize {
        self.map.iter().filter(|cell| **cell == element).count()
    }

    /// Cell occupied by `agent`.
    #[must_use]
    pub fn agent_position(&self, agent: AgentId) -> Option<CellCoord> {
        if agent.get() == 0 {
            return None;
        }
        self.agent_positions.get(agent.index()).copied()
    }

    /// Iterator over `(agent, cell)` pairs in ascending id order.
    pub fn agent_positions(&self) -> impl Iterator<Item = (AgentId, CellCoord)> + '_ {
        self.agent_positions
            .iter()
            .enumerate()
            .map(|(index, cell)| (AgentId::from_index(index as u32), *cell))
    }

    /// Agent positions keyed `agent_<i>` as `(x, y)` tuples.
    #[must_use]
    pub fn keyed_positions(&self) -> BTreeMap<String, (u32, u32)> {
        self.agent_positions()
            .map(|(agent, cell)| (agent.key(), (cell.x(), cell.y())))
            .collect()
    }
}

/// Errors raised when a world is configured or addressed inconsistently.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// The grid has no cells.
    #[error("grid_size must be at least 1")]
    EmptyGrid,
    /// The grid has more cells than a world will allocate.
    #[error("grid_size {grid_size} exceeds the maximum of {max}")]
    GridTooLarge {
        /// Requested side length.
        grid_size: u32,
        /// Largest accepted side length.
        max: u32,
    },
    /// More entities were requested than the grid accepts.
    #[error(
        "nb_agents + nb_targets + nb_mobiles ({population}) should be at most \
         (grid_size - 1)^2 ({capacity})"
    )]
    PopulationExceedsCapacity {
        /// Requested number of entities.
        population: u64,
        /// Maximum number of entities accepted.
        capacity: u64,
    },
    /// Captures would fire with no adjacent agents.
    #[error("capture threshold must be at least 1")]
    InvalidCaptureThreshold,
    /// An explicit layout disagrees with the configured entity counts.
    #[error("layout places {supplied} {kind} but the configuration requests {expected}")]
    LayoutCountMismatch {
        /// Entity class whose count disagrees.
        kind: &'static str,
        /// Count requested by the configuration.
        expected: u32,
        /// Count present in the layout.
        supplied: usize,
    },
    /// An explicit layout places an entity outside the grid.
    #[error("layout cell {0} lies outside the grid")]
    LayoutOutOfBounds(CellCoord),
    /// An explicit layout places two entities on one cell.
    #[error("layout places more than one entity on {0}")]
    LayoutOverlap(CellCoord),
    /// A joint action omits an agent.
    #[error("no action supplied for {0}")]
    MissingAgent(AgentId),
    /// A joint action names an agent that does not exist.
    #[error("`{0}` does not name an agent of this world")]
    UnknownAgent(String),
    /// A joint action names an agent twice.
    #[error("more than one action supplied for {0}")]
    DuplicateAgent(AgentId),
    /// A joint action covers a different number of agents than the world hosts.
    #[error("joint action covers {supplied} agents but the world hosts {expected}")]
    AgentCountMismatch {
        /// Number of agents hosted by the world.
        expected: u32,
        /// Number of agents covered by the joint action.
        supplied: usize,
    },
}

/// Raised when an action code does not name an [`Action`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("action code {code} for {agent} is outside 0..=4")]
pub struct InvalidActionError {
    /// Agent the code was supplied for.
    pub agent: AgentId,
    /// Offending code.
    pub code: u8,
}

/// Errors that reject a step before any state changes.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StepError {
    /// The supplied actions do not match the world's agents.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    /// An action code is outside the action enumeration.
    #[error(transparent)]
    InvalidAction(#[from] InvalidActionError),
}

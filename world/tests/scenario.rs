use std::collections::VecDeque;

use team_catcher_core::{
    Action, AgentId, CellCoord, ConfigurationError, JointAction, MapElement, WorldConfig,
    MAX_GRID_SIZE,
};
use team_catcher_world::{query, World};

const GRID_SIZE: u32 = 5;

#[test]
fn two_agents_capture_the_target_when_both_become_adjacent() {
    let mut world = World::new(WorldConfig::new(GRID_SIZE, 2, 1, 0).with_seed(42))
        .expect("valid configuration");
    let observation = world.reset();

    let occupied = observation
        .map()
        .iter()
        .filter(|element| **element != MapElement::Empty)
        .count();
    assert_eq!(occupied, 3);
    assert_eq!(world.targets_alive(), 1);

    let target = query::target_snapshots(&world)[0].cell;
    let ring: Vec<CellCoord> = Action::ALL[1..]
        .iter()
        .filter_map(|action| target.offset(action.displacement(), GRID_SIZE))
        .collect();
    let adjacent = |cell: CellCoord| ring.contains(&cell);
    let mut events = Vec::new();

    for _ in 0..64 {
        let state = world.export_state();
        let first = state.agent_position(agent(1)).expect("agent_1");
        let second = state.agent_position(agent(2)).expect("agent_2");

        let actions = if adjacent(first) && adjacent(second) {
            vec![Action::Noop, Action::Noop]
        } else if !adjacent(first) {
            vec![approach(first, &ring, &[target, second]), Action::Noop]
        } else {
            vec![Action::Noop, approach(second, &ring, &[target, first])]
        };

        let captures = world
            .update(&JointAction::from_actions(actions), &mut events)
            .expect("valid step");

        let state = world.export_state();
        let first = state.agent_position(agent(1)).expect("agent_1");
        let second = state.agent_position(agent(2)).expect("agent_2");
        if adjacent(first) && adjacent(second) {
            assert_eq!(captures.targets, 1);
            assert_eq!(world.targets_alive(), 0);
            assert_eq!(state.element(target), Some(MapElement::Empty));
            return;
        }
        assert_eq!(captures.targets, 0, "capture before both agents were adjacent");
    }

    panic!("scripted agents never surrounded the target");
}

#[test]
fn overcrowded_grid_fails_before_building_state() {
    let result = World::new(WorldConfig::new(3, 5, 0, 0));

    let error = result.err().expect("configuration must be rejected");
    assert_eq!(
        error,
        ConfigurationError::PopulationExceedsCapacity {
            population: 5,
            capacity: 4,
        }
    );
    assert!(error.to_string().contains("(5)"));
    assert!(error.to_string().contains("(4)"));
}

#[test]
fn oversized_grid_fails_without_allocating() {
    let result = World::new(WorldConfig::new(u32::MAX, 1, 1, 0).with_seed(1));

    assert_eq!(
        result.err(),
        Some(ConfigurationError::GridTooLarge {
            grid_size: u32::MAX,
            max: MAX_GRID_SIZE,
        })
    );
}

fn agent(id: u32) -> AgentId {
    AgentId::new(id)
}

/// First action on a shortest path from `from` to any free goal cell.
fn approach(from: CellCoord, goals: &[CellCoord], blocked: &[CellCoord]) -> Action {
    let goals: Vec<CellCoord> = goals
        .iter()
        .copied()
        .filter(|goal| !blocked.contains(goal))
        .collect();
    let mut visited = vec![from];
    let mut queue: VecDeque<(CellCoord, Action)> = VecDeque::new();

    for action in &Action::ALL[1..] {
        if let Some(next) = from.offset(action.displacement(), GRID_SIZE) {
            if !blocked.contains(&next) {
                visited.push(next);
                queue.push_back((next, *action));
            }
        }
    }

    while let Some((cell, first)) = queue.pop_front() {
        if goals.contains(&cell) {
            return first;
        }
        for action in &Action::ALL[1..] {
            if let Some(next) = cell.offset(action.displacement(), GRID_SIZE) {
                if !blocked.contains(&next) && !visited.contains(&next) {
                    visited.push(next);
                    queue.push_back((next, first));
                }
            }
        }
    }

    panic!("no path from {from} to the target ring");
}

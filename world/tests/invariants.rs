use std::collections::HashSet;

use proptest::{prelude::*, test_runner::TestCaseError};
use team_catcher_core::{Action, JointAction, MapElement, WorldConfig};
use team_catcher_world::{query, World};

const STEPS: usize = 40;

fn check_invariants(world: &World) -> Result<(), TestCaseError> {
    let config = query::config(world);
    let observation = world.export_state();

    let mut seen = HashSet::new();
    for (_, cell) in observation.agent_positions() {
        prop_assert!(cell.is_within(config.grid_size), "agent left the grid: {cell}");
        prop_assert!(seen.insert(cell), "two entities share {cell}");
        prop_assert_eq!(observation.element(cell), Some(MapElement::Agent));
    }

    for target in query::target_snapshots(world).iter().filter(|t| t.alive) {
        prop_assert!(target.cell.is_within(config.grid_size));
        prop_assert!(seen.insert(target.cell), "two entities share {}", target.cell);
        prop_assert_eq!(observation.element(target.cell), Some(MapElement::Target));
    }

    for mobile in query::mobile_snapshots(world).iter().filter(|m| m.alive) {
        prop_assert!(mobile.cell.is_within(config.grid_size));
        prop_assert!(seen.insert(mobile.cell), "two entities share {}", mobile.cell);
        prop_assert_eq!(observation.element(mobile.cell), Some(MapElement::Mobile));
    }

    prop_assert_eq!(observation.count(MapElement::Agent), config.nb_agents as usize);
    prop_assert_eq!(
        observation.count(MapElement::Target),
        world.targets_alive() as usize
    );
    prop_assert_eq!(
        observation.count(MapElement::Mobile),
        query::mobiles_alive(world) as usize
    );
    Ok(())
}

fn population(grid_size: u32, fill: f64) -> (u32, u32, u32) {
    let side = u64::from(grid_size - 1);
    let total = ((side * side) as f64 * fill) as u32;
    let agents = total / 2;
    let targets = total / 4;
    (agents, targets, total - agents - targets)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn invariants_hold_across_random_episodes(
        grid_size in 2u32..12,
        fill in 0.0f64..1.0,
        seed in any::<u64>(),
        script in proptest::collection::vec(0u8..5, 1..256),
    ) {
        let (agents, targets, mobiles) = population(grid_size, fill);
        let config = WorldConfig::new(grid_size, agents, targets, mobiles).with_seed(seed);
        let mut world = World::new(config).expect("population within capacity");
        let _ = world.reset();
        check_invariants(&world)?;

        let mut events = Vec::new();
        let mut previous_alive = world.targets_alive();
        let mut captured_targets = 0;
        let mut alive_flags: Vec<bool> = vec![true; targets as usize];

        for step in 0..STEPS {
            let actions = JointAction::from_fn(agents, |agent| {
                let slot = (step * agents as usize + agent.index()) % script.len();
                Action::from_code(script[slot]).unwrap_or(Action::Noop)
            });
            let captures = world.update(&actions, &mut events).expect("valid step");
            check_invariants(&world)?;

            captured_targets += captures.targets;
            prop_assert!(world.targets_alive() <= previous_alive);
            prop_assert_eq!(world.targets_alive(), targets - captured_targets);
            prop_assert!(captured_targets <= targets);
            previous_alive = world.targets_alive();

            for (index, target) in query::target_snapshots(&world).iter().enumerate() {
                prop_assert!(
                    alive_flags[index] || !target.alive,
                    "target {} was resurrected",
                    target.id.get()
                );
                alive_flags[index] = target.alive;
            }
        }
    }
}

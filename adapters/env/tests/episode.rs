use team_catcher_core::{AgentId, CellCoord, Event, Layout, MobileMotion, PolicyConfig, WorldConfig};
use team_catcher_env::{ActionMapping, TeamCatcher};
use team_catcher_world::{query, World};

fn idle(nb_agents: u32) -> ActionMapping {
    (0..nb_agents)
        .map(|index| (AgentId::from_index(index).key(), 0))
        .collect()
}

fn scripted(
    grid_size: u32,
    agents: &[(u32, u32)],
    targets: &[(u32, u32)],
    mobiles: &[(u32, u32)],
) -> TeamCatcher {
    let cells = |points: &[(u32, u32)]| -> Vec<CellCoord> {
        points.iter().map(|(x, y)| CellCoord::new(*x, *y)).collect()
    };
    let policies = PolicyConfig {
        mobile_motion: MobileMotion::Static,
        ..PolicyConfig::default()
    };
    let config = WorldConfig::new(
        grid_size,
        agents.len() as u32,
        targets.len() as u32,
        mobiles.len() as u32,
    )
    .with_seed(3)
    .with_policies(policies);
    let layout = Layout {
        agents: cells(agents),
        targets: cells(targets),
        mobiles: cells(mobiles),
    };
    TeamCatcher::from_world(World::with_layout(config, layout).expect("valid layout"))
}

#[test]
fn reset_reports_every_agent_position() {
    let mut env = TeamCatcher::new(WorldConfig::new(10, 6, 3, 2).with_seed(8))
        .expect("valid configuration");

    let observation = env.reset();
    let positions = observation.keyed_positions();

    assert_eq!(positions.len(), 6);
    assert!(positions.contains_key("agent_1"));
    assert!(positions.contains_key("agent_6"));
    assert!(positions.values().all(|(x, y)| *x < 10 && *y < 10));
    assert_eq!(observation.to_values().len(), 10);
}

#[test]
fn surrounding_target_finishes_the_episode() {
    // agent_1 already sits above the target at (1, 1); agent_2 steps up beside it.
    let mut env = scripted(4, &[(1, 0), (0, 2)], &[(1, 1)], &[]);
    let mut actions = idle(2);
    let _ = actions.insert("agent_2".to_owned(), 1);

    let transition = env.step(&actions).expect("valid step");

    assert_eq!(transition.reward, 1);
    assert!(transition.done);
    assert_eq!(transition.info.step, 1);
    assert_eq!(transition.info.targets_alive, 0);
    assert!(env.last_events().iter().any(|event| matches!(
        event,
        Event::TargetCaptured { at, .. } if *at == CellCoord::new(1, 1)
    )));
}

#[test]
fn simultaneous_target_and_mobile_captures_add_up() {
    let mut env = scripted(5, &[(1, 0), (0, 1), (3, 2), (2, 3)], &[(1, 1)], &[(3, 3)]);

    let transition = env.step(&idle(4)).expect("valid step");

    assert_eq!(transition.reward, 3);
    assert!(transition.done);
    assert_eq!(env.episode_captures().targets, 1);
    assert_eq!(env.episode_captures().mobiles, 1);
    assert_eq!(query::mobiles_alive(env.world()), 0);
}

#[test]
fn episode_continues_while_targets_remain() {
    let mut env = scripted(5, &[(0, 0), (4, 4)], &[(2, 2)], &[]);

    let transition = env.step(&idle(2)).expect("valid step");

    assert_eq!(transition.reward, 0);
    assert!(!transition.done);
    assert_eq!(transition.info.targets_alive, 1);
    assert_eq!(
        env.last_events(),
        &[Event::StepCompleted {
            step: 1,
            captures: Default::default(),
        }]
    );
}

//! Serial resolution of simultaneous agent moves.
//!
//! Every agent's request is resolved against the live occupancy grid one at
//! a time in the configured priority order. A move commits only when its
//! destination is on the grid and empty at the moment the agent is
//! processed, so two agents can never merge onto a cell or swap places, and
//! targets and mobiles are never overwritten.

use team_catcher_core::{Action, BlockReason, Event, JointAction, ResolutionOrder};

use crate::{grid::OccupancyGrid, Agent};

/// Applies `actions` to `agents`, committing each accepted move immediately.
///
/// `actions` must cover exactly the agents in `agents`.
pub(crate) fn resolve_agent_moves(
    agents: &mut [Agent],
    grid: &mut OccupancyGrid,
    actions: &JointAction,
    order: ResolutionOrder,
    out_events: &mut Vec<Event>,
) {
    let count = agents.len();
    for position in 0..count {
        let index = match order {
            ResolutionOrder::AscendingId => position,
            ResolutionOrder::DescendingId => count - 1 - position,
        };
        let agent = &mut agents[index];
        let action = actions.get(agent.id).unwrap_or(Action::Noop);
        commit_move(agent, action, grid, out_events);
    }
}

fn commit_move(
    agent: &mut Agent,
    action: Action,
    grid: &mut OccupancyGrid,
    out_events: &mut Vec<Event>,
) {
    if action == Action::Noop {
        return;
    }

    let from = agent.cell;
    let Some(to) = from.offset(action.displacement(), grid.size()) else {
        out_events.push(Event::AgentBlocked {
            agent: agent.id,
            at: from,
            reason: BlockReason::Boundary,
        });
        return;
    };

    if !grid.is_free(to) {
        out_events.push(Event::AgentBlocked {
            agent: agent.id,
            at: from,
            reason: BlockReason::Occupied,
        });
        return;
    }

    grid.relocate(from, to);
    agent.cell = to;
    out_events.push(Event::AgentMoved {
        agent: agent.id,
        from,
        to,
    });
}

//! Capture detection for targets and mobiles.

use team_catcher_core::{Captures, CellCoord, Event, MapElement, Neighborhood, PolicyConfig};
use tracing::trace;

use crate::{grid::OccupancyGrid, Mobile, Target};

/// Removes every live target and mobile surrounded by enough agents.
///
/// All entities are judged against the same snapshot of the grid before
/// any of them is removed, so the result does not depend on processing
/// order.
pub(crate) fn detect_captures(
    targets: &mut [Target],
    mobiles: &mut [Mobile],
    grid: &mut OccupancyGrid,
    policies: &PolicyConfig,
    out_events: &mut Vec<Event>,
) -> Captures {
    let neighborhood = policies.capture_neighborhood;
    let threshold = policies.capture_threshold;
    let surrounded =
        |cell: CellCoord| adjacent_agents(grid, cell, neighborhood) >= threshold;

    let captured_targets: Vec<usize> = targets
        .iter()
        .enumerate()
        .filter(|(_, target)| target.alive && surrounded(target.cell))
        .map(|(index, _)| index)
        .collect();
    let captured_mobiles: Vec<usize> = mobiles
        .iter()
        .enumerate()
        .filter(|(_, mobile)| mobile.alive && surrounded(mobile.cell))
        .map(|(index, _)| index)
        .collect();

    let mut captures = Captures::default();

    for index in captured_targets {
        let target = &mut targets[index];
        target.alive = false;
        grid.vacate(target.cell);
        captures.targets += 1;
        trace!(target_id = target.id.get(), cell = %target.cell, "target captured");
        out_events.push(Event::TargetCaptured {
            target: target.id,
            at: target.cell,
        });
    }

    for index in captured_mobiles {
        let mobile = &mut mobiles[index];
        mobile.alive = false;
        grid.vacate(mobile.cell);
        captures.mobiles += 1;
        trace!(mobile_id = mobile.id.get(), cell = %mobile.cell, "mobile captured");
        out_events.push(Event::MobileCaptured {
            mobile: mobile.id,
            at: mobile.cell,
        });
    }

    captures
}

fn adjacent_agents(grid: &OccupancyGrid, cell: CellCoord, neighborhood: Neighborhood) -> u32 {
    let count = neighborhood
        .offsets()
        .iter()
        .filter_map(|offset| cell.offset(*offset, grid.size()))
        .filter(|neighbor| grid.element(*neighbor) == Some(MapElement::Agent))
        .count();
    count as u32
}

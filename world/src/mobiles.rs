//! Motion of mobiles, independent of agent actions.

use rand::{seq::SliceRandom, Rng};
use team_catcher_core::{CellCoord, Event, MobileMotion, Neighborhood};

use crate::{grid::OccupancyGrid, Mobile};

/// Moves every live mobile once, in ascending id order, under `motion`.
///
/// Runs after agent moves are committed so mobiles see the post-move layout.
pub(crate) fn advance_mobiles<R>(
    mobiles: &mut [Mobile],
    grid: &mut OccupancyGrid,
    motion: MobileMotion,
    rng: &mut R,
    out_events: &mut Vec<Event>,
) where
    R: Rng + ?Sized,
{
    match motion {
        MobileMotion::Static => {}
        MobileMotion::RandomWalk => random_walk(mobiles, grid, rng, out_events),
    }
}

fn random_walk<R>(
    mobiles: &mut [Mobile],
    grid: &mut OccupancyGrid,
    rng: &mut R,
    out_events: &mut Vec<Event>,
) where
    R: Rng + ?Sized,
{
    let size = grid.size();
    let mut free: Vec<CellCoord> = Vec::with_capacity(4);

    for mobile in mobiles.iter_mut().filter(|mobile| mobile.alive) {
        free.clear();
        free.extend(
            Neighborhood::VonNeumann
                .offsets()
                .iter()
                .filter_map(|offset| mobile.cell.offset(*offset, size))
                .filter(|cell| grid.is_free(*cell)),
        );

        // Boxed in: stay put.
        let Some(&to) = free.choose(rng) else {
            continue;
        };

        let from = mobile.cell;
        grid.relocate(from, to);
        mobile.cell = to;
        out_events.push(Event::MobileMoved {
            mobile: mobile.id,
            from,
            to,
        });
    }
}

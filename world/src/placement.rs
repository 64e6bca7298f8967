//! Random placement of every entity at the start of an episode.

use rand::{seq::index, Rng};
use team_catcher_core::{CellCoord, ConfigurationError, Layout, Population};

/// Samples distinct cells uniformly without replacement and hands them out
/// to agents first, then targets, then mobiles.
///
/// The population must already be validated against the grid capacity.
pub(crate) fn sample_layout<R>(grid_size: u32, population: Population, rng: &mut R) -> Layout
where
    R: Rng + ?Sized,
{
    let cell_count = usize::try_from(u64::from(grid_size) * u64::from(grid_size))
        .unwrap_or(usize::MAX);
    let amount = usize::try_from(population.total())
        .unwrap_or(usize::MAX)
        .min(cell_count);

    let mut cells = index::sample(rng, cell_count, amount)
        .into_iter()
        .map(|index| cell_at(index, grid_size));

    let agents = cells.by_ref().take(population.agents as usize).collect();
    let targets = cells.by_ref().take(population.targets as usize).collect();
    let mobiles = cells.collect();

    Layout {
        agents,
        targets,
        mobiles,
    }
}

/// Checks that an explicit layout matches the population and the grid.
pub(crate) fn validate_layout(
    grid_size: u32,
    population: Population,
    layout: &Layout,
) -> Result<(), ConfigurationError> {
    let groups = [
        ("agents", population.agents, &layout.agents),
        ("targets", population.targets, &layout.targets),
        ("mobiles", population.mobiles, &layout.mobiles),
    ];

    for (kind, expected, cells) in groups {
        if cells.len() != expected as usize {
            return Err(ConfigurationError::LayoutCountMismatch {
                kind,
                expected,
                supplied: cells.len(),
            });
        }
    }

    let mut seen: Vec<CellCoord> = Vec::with_capacity(cells_in(layout));
    for cell in layout
        .agents
        .iter()
        .chain(&layout.targets)
        .chain(&layout.mobiles)
    {
        if !cell.is_within(grid_size) {
            return Err(ConfigurationError::LayoutOutOfBounds(*cell));
        }
        seen.push(*cell);
    }

    seen.sort_unstable();
    if let Some(pair) = seen.windows(2).find(|pair| pair[0] == pair[1]) {
        return Err(ConfigurationError::LayoutOverlap(pair[0]));
    }
    Ok(())
}

fn cells_in(layout: &Layout) -> usize {
    layout.agents.len() + layout.targets.len() + layout.mobiles.len()
}

fn cell_at(index: usize, grid_size: u32) -> CellCoord {
    let width = (grid_size as usize).max(1);
    CellCoord::new((index % width) as u32, (index / width) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn population(agents: u32, targets: u32, mobiles: u32) -> Population {
        Population {
            agents,
            targets,
            mobiles,
        }
    }

    #[test]
    fn sampled_cells_are_distinct_and_in_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let layout = sample_layout(6, population(10, 8, 7), &mut rng);

        assert_eq!(layout.agents.len(), 10);
        assert_eq!(layout.targets.len(), 8);
        assert_eq!(layout.mobiles.len(), 7);
        assert_eq!(validate_layout(6, population(10, 8, 7), &layout), Ok(()));
    }

    #[test]
    fn sampling_is_a_function_of_the_seed() {
        let first = sample_layout(16, population(12, 6, 3), &mut ChaCha8Rng::seed_from_u64(5));
        let second = sample_layout(16, population(12, 6, 3), &mut ChaCha8Rng::seed_from_u64(5));
        assert_eq!(first, second);
    }

    #[test]
    fn overlapping_layout_is_rejected() {
        let layout = Layout {
            agents: vec![CellCoord::new(1, 1), CellCoord::new(2, 2)],
            targets: vec![CellCoord::new(2, 2)],
            mobiles: Vec::new(),
        };
        assert_eq!(
            validate_layout(4, population(2, 1, 0), &layout),
            Err(ConfigurationError::LayoutOverlap(CellCoord::new(2, 2)))
        );
    }

    #[test]
    fn out_of_bounds_layout_is_rejected() {
        let layout = Layout {
            agents: vec![CellCoord::new(4, 0)],
            targets: Vec::new(),
            mobiles: Vec::new(),
        };
        assert_eq!(
            validate_layout(4, population(1, 0, 0), &layout),
            Err(ConfigurationError::LayoutOutOfBounds(CellCoord::new(4, 0)))
        );
    }

    #[test]
    fn miscounted_layout_is_rejected() {
        let layout = Layout {
            agents: vec![CellCoord::new(0, 0)],
            targets: Vec::new(),
            mobiles: Vec::new(),
        };
        assert_eq!(
            validate_layout(4, population(1, 1, 0), &layout),
            Err(ConfigurationError::LayoutCountMismatch {
                kind: "targets",
                expected: 1,
                supplied: 0,
            })
        );
    }
}

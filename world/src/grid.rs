//! Dense occupancy grid holding at most one occupant per cell.

use team_catcher_core::{CellCoord, MapElement};

#[derive(Clone, Debug)]
pub(crate) struct OccupancyGrid {
    size: u32,
    cells: Vec<MapElement>,
}

impl OccupancyGrid {
    /// Allocates an empty grid; `size` must already be bounded by `MAX_GRID_SIZE`.
    pub(crate) fn new(size: u32) -> Self {
        let side = size as usize;
        Self {
            size,
            cells: vec![MapElement::Empty; side * side],
        }
    }

    pub(crate) const fn size(&self) -> u32 {
        self.size
    }

    pub(crate) fn clear(&mut self) {
        self.cells.fill(MapElement::Empty);
    }

    /// Element at `cell`, or `None` outside the grid.
    pub(crate) fn element(&self, cell: CellCoord) -> Option<MapElement> {
        self.index(cell)
            .and_then(|index| self.cells.get(index).copied())
    }

    /// Reports whether `cell` lies on the grid and holds nothing.
    pub(crate) fn is_free(&self, cell: CellCoord) -> bool {
        self.element(cell) == Some(MapElement::Empty)
    }

    pub(crate) fn occupy(&mut self, element: MapElement, cell: CellCoord) {
        if let Some(index) = self.index(cell) {
            if let Some(slot) = self.cells.get_mut(index) {
                *slot = element;
            }
        }
    }

    pub(crate) fn vacate(&mut self, cell: CellCoord) {
        self.occupy(MapElement::Empty, cell);
    }

    /// Moves whatever occupies `from` onto `to`.
    pub(crate) fn relocate(&mut self, from: CellCoord, to: CellCoord) {
        if let Some(element) = self.element(from) {
            self.vacate(from);
            self.occupy(element, to);
        }
    }

    /// Row-major iterator over every cell.
    pub(crate) fn elements(&self) -> impl Iterator<Item = MapElement> + '_ {
        self.cells.iter().copied()
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.is_within(self.size) {
            let row = usize::try_from(cell.y()).ok()?;
            let column = usize::try_from(cell.x()).ok()?;
            let width = usize::try_from(self.size).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

use crate::{Cell, Side};

/// The cells of a board together with counters derived from them.
///
/// All writes go through [`Grid::put`], which keeps the counters in sync.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Grid {
    size: usize,
    // Row-major
    cells: Vec<Cell>,
    // Number of squares owned by each side, indexed by `Side::index()`
    owned: [usize; 2],
    // Sum of the spots over all cells, owned or not
    pieces: u32,
}

impl Grid {
    pub(crate) fn new(size: usize) -> Self {
        let num_cells = size * size;
        Self {
            size,
            cells: vec![Cell::EMPTY; num_cells],
            owned: [0, 0],
            pieces: num_cells as u32 * Cell::EMPTY.spots(),
        }
    }

    pub(crate) fn size(&self) -> usize {
        self.size
    }

    pub(crate) fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn get(&self, sq: usize) -> Cell {
        self.cells[sq]
    }

    pub(crate) fn put(&mut self, sq: usize, cell: Cell) {
        let old = std::mem::replace(&mut self.cells[sq], cell);
        if let Some(side) = old.owner() {
            self.owned[side.index()] -= 1;
        }
        if let Some(side) = cell.owner() {
            self.owned[side.index()] += 1;
        }
        self.pieces = self.pieces - old.spots() + cell.spots();
    }

    pub(crate) fn pieces(&self) -> u32 {
        self.pieces
    }

    pub(crate) fn num_of_side(&self, side: Side) -> usize {
        self.owned[side.index()]
    }

    pub(crate) fn winner(&self) -> Option<Side> {
        Side::ALL
            .into_iter()
            .find(|&side| self.owned[side.index()] == self.cells.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_follow_puts() {
        let mut grid = Grid::new(2);
        assert_eq!(grid.pieces(), 4);
        grid.put(0, Cell::new(Some(Side::Red), 2));
        grid.put(1, Cell::new(Some(Side::Blue), 3));
        assert_eq!(grid.pieces(), 7);
        assert_eq!(grid.num_of_side(Side::Red), 1);
        assert_eq!(grid.num_of_side(Side::Blue), 1);
        grid.put(1, Cell::new(Some(Side::Red), 1));
        assert_eq!(grid.num_of_side(Side::Red), 2);
        assert_eq!(grid.num_of_side(Side::Blue), 0);
        assert_eq!(grid.pieces(), 5);
        assert_eq!(grid.winner(), None);
        grid.put(2, Cell::new(Some(Side::Red), 1));
        grid.put(3, Cell::new(Some(Side::Red), 1));
        assert_eq!(grid.winner(), Some(Side::Red));
    }
}

use super::grid::Grid;

/// How much of a move a single [`Board::undo`](crate::Board::undo) reverts.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum UndoGranularity {
    /// One undo reverts one complete `add_spot`, including its cascade.
    #[default]
    Move,
    /// One undo reverts one atomic step of a cascade: the initial
    /// increment, an overflowing square being reset, or one neighbor
    /// receiving a spot.
    Step,
    /// Nothing is recorded. Used for scratch boards that are never undone.
    Off,
}

#[derive(Clone, Debug)]
struct Snapshot {
    grid: Grid,
    move_count: usize,
}

/// The undo stack of a board.
///
/// Each entry is the state just before the mutation it reverts.
#[derive(Clone, Debug, Default)]
pub(crate) struct History {
    granularity: UndoGranularity,
    snapshots: Vec<Snapshot>,
}

impl History {
    pub(crate) fn new(granularity: UndoGranularity) -> Self {
        Self {
            granularity,
            snapshots: Vec::new(),
        }
    }

    pub(crate) fn granularity(&self) -> UndoGranularity {
        self.granularity
    }

    pub(crate) fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub(crate) fn clear(&mut self) {
        self.snapshots.clear();
    }

    /// Called once before an `add_spot` touches the board.
    pub(crate) fn begin_move(&mut self, grid: &Grid, move_count: usize) {
        if self.granularity == UndoGranularity::Move {
            self.push(grid, move_count);
        }
    }

    /// Called before every atomic mutation.
    pub(crate) fn begin_step(&mut self, grid: &Grid, move_count: usize) {
        if self.granularity == UndoGranularity::Step {
            self.push(grid, move_count);
        }
    }

    /// Removes the latest entry, returning the grid and move count it holds.
    pub(crate) fn pop(&mut self) -> Option<(Grid, usize)> {
        self.snapshots
            .pop()
            .map(|Snapshot { grid, move_count }| (grid, move_count))
    }

    fn push(&mut self, grid: &Grid, move_count: usize) {
        self.snapshots.push(Snapshot {
            grid: grid.clone(),
            move_count,
        });
    }
}

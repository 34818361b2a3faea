mod grid;
mod history;
mod neighbors;

pub use history::UndoGranularity;
pub use neighbors::*;
use tracing::{debug, trace};

use self::grid::Grid;
use self::history::History;
use crate::{BoardError, Cell, IllegalSpot, Side};

/// A callback that is handed the board after every visible change.
pub type Notifier = Box<dyn FnMut(&Board)>;

/// The state of a game on an N x N grid.
///
/// Squares are addressed either by 1-based row and column, or by a 0-based
/// square number in row-major order, so that row 1 holds squares
/// `0..size`, row 2 holds `size..2 * size` and so on. Methods taking a
/// square number end in `_sq`.
///
/// The side to move is not stored. It follows from the parity of the total
/// number of spots on the board plus the size, which is why every legal
/// move flips it.
pub struct Board {
    grid: Grid,
    /// Atomic mutations applied on the current line of play.
    move_count: usize,
    history: History,
    notifier: Option<Notifier>,
}

impl Board {
    /// An N x N board in the initial configuration: every square unowned
    /// with a single spot.
    ///
    /// Panics if `size < 2`, since on a 1 x 1 board no move is ever legal.
    pub fn new(size: usize) -> Self {
        assert!(size >= 2, "Board size must be at least 2, got {}", size);
        Self {
            grid: Grid::new(size),
            move_count: 0,
            history: History::default(),
            notifier: None,
        }
    }

    /// A board with the contents of `other`, but with an empty undo
    /// history and no notifier.
    pub fn copy_of(other: &Board) -> Self {
        Self {
            grid: other.grid.clone(),
            move_count: 0,
            history: History::default(),
            notifier: None,
        }
    }

    /// Same as [`Self::copy_of()`], for boards that are never undone.
    pub(crate) fn scratch_copy(other: &Board) -> Self {
        Self {
            history: History::new(UndoGranularity::Off),
            ..Self::copy_of(other)
        }
    }

    /// Changes what a single [`Self::undo()`] reverts. Discards the history.
    pub fn with_undo_granularity(mut self, granularity: UndoGranularity) -> Self {
        self.history = History::new(granularity);
        self
    }

    pub fn undo_granularity(&self) -> UndoGranularity {
        self.history.granularity()
    }

    /// Resets to an N x N board in the initial configuration and clears the
    /// undo history.
    pub fn clear(&mut self, size: usize) {
        assert!(size >= 2, "Board size must be at least 2, got {}", size);
        self.grid = Grid::new(size);
        self.move_count = 0;
        self.history.clear();
        debug!(size, "Cleared board");
        self.announce();
    }

    /// Replaces my contents with those of `other` and clears the undo
    /// history. The notifier is kept but not invoked.
    pub fn copy_from(&mut self, other: &Board) {
        self.grid = other.grid.clone();
        self.move_count = 0;
        self.history.clear();
    }

    /// Installs a notifier and invokes it once with the current state.
    pub fn set_notifier(&mut self, notifier: impl FnMut(&Board) + 'static) {
        self.notifier = Some(Box::new(notifier));
        self.announce();
    }

    /// Removes the notifier, returning it if there was one.
    pub fn take_notifier(&mut self) -> Option<Notifier> {
        self.notifier.take()
    }

    fn announce(&mut self) {
        // The notifier needs a shared borrow of the whole board
        if let Some(mut notifier) = self.notifier.take() {
            notifier(self);
            self.notifier = Some(notifier);
        }
    }

    pub fn size(&self) -> usize {
        self.grid.size()
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        self.grid.cells()
    }

    /// The contents of the square at row `r`, column `c`.
    ///
    /// Panics if the square does not exist.
    pub fn get(&self, r: usize, c: usize) -> Cell {
        assert!(self.exists(r, c), "Square {} {} does not exist", r, c);
        self.grid.get(self.sq_num(r, c))
    }

    /// The contents of square number `sq`.
    ///
    /// Panics if the square does not exist.
    pub fn get_sq(&self, sq: usize) -> Cell {
        self.grid.get(sq)
    }

    /// The total number of spots on the board, including the single spot
    /// on every unowned square.
    pub fn num_pieces(&self) -> u32 {
        self.grid.pieces()
    }

    /// The side that moves next. Once the game is won this is the loser.
    pub fn whose_move(&self) -> Side {
        if (self.num_pieces() as usize + self.size()) % 2 == 0 {
            Side::Red
        } else {
            Side::Blue
        }
    }

    pub fn exists(&self, r: usize, c: usize) -> bool {
        (1..=self.size()).contains(&r) && (1..=self.size()).contains(&c)
    }

    pub fn exists_sq(&self, sq: usize) -> bool {
        sq < self.size() * self.size()
    }

    /// The 1-based row of square number `sq`.
    pub fn row(&self, sq: usize) -> usize {
        sq / self.size() + 1
    }

    /// The 1-based column of square number `sq`.
    pub fn col(&self, sq: usize) -> usize {
        sq % self.size() + 1
    }

    /// Panics if the square does not exist.
    pub fn sq_num(&self, r: usize, c: usize) -> usize {
        assert!(self.exists(r, c), "Square {} {} does not exist", r, c);
        (r - 1) * self.size() + (c - 1)
    }

    /// `"<row> <col>"` for square number `sq`.
    pub fn move_string(&self, sq: usize) -> String {
        format!("{} {}", self.row(sq), self.col(sq))
    }

    /// The number of neighbors of the square at row `r`, column `c`, which
    /// is also the most spots it can hold without overflowing.
    ///
    /// Panics if the square does not exist.
    pub fn capacity(&self, r: usize, c: usize) -> u32 {
        assert!(self.exists(r, c), "Square {} {} does not exist", r, c);
        neighbors::capacity(self.size(), r - 1, c - 1)
    }

    /// The number of neighbors of square number `sq`.
    pub fn neighbors_sq(&self, sq: usize) -> u32 {
        neighbors::capacity(self.size(), sq / self.size(), sq % self.size())
    }

    /// The squares adjacent to `sq`, in the order an overflow visits them.
    pub fn adjacent(&self, sq: usize) -> Neighbors {
        Neighbors::new(self.size(), sq)
    }

    /// The number of squares owned by `side`.
    pub fn num_of_side(&self, side: Side) -> usize {
        self.grid.num_of_side(side)
    }

    /// The side owning every square, if there is one.
    pub fn winner(&self) -> Option<Side> {
        self.grid.winner()
    }

    /// Checks whether `side` may add a spot to square number `sq` now.
    pub fn check_legal(&self, side: Side, sq: usize) -> Result<(), IllegalSpot> {
        if !self.exists_sq(sq) {
            return Err(IllegalSpot::OutOfBounds);
        }
        if let Some(winner) = self.winner() {
            return Err(IllegalSpot::GameOver { winner });
        }
        let to_move = self.whose_move();
        if side != to_move {
            return Err(IllegalSpot::NotYourTurn { to_move });
        }
        let cell = self.grid.get(sq);
        match cell.owner() {
            Some(owner) if owner == side => Ok(()),
            Some(_) => Err(IllegalSpot::OwnedByOpponent),
            None => {
                let capacity = self.neighbors_sq(sq);
                if cell.spots() < capacity {
                    Ok(())
                } else {
                    Err(IllegalSpot::UnownedCellFull {
                        spots: cell.spots(),
                        capacity,
                    })
                }
            }
        }
    }

    /// Whether `side` may add a spot at row `r`, column `c` now.
    pub fn is_legal(&self, side: Side, r: usize, c: usize) -> bool {
        self.exists(r, c) && self.is_legal_sq(side, self.sq_num(r, c))
    }

    /// Whether `side` may add a spot to square number `sq` now.
    pub fn is_legal_sq(&self, side: Side, sq: usize) -> bool {
        self.check_legal(side, sq).is_ok()
    }

    /// Whether `side` still has a square to play on, i.e. the opponent does
    /// not own the whole board.
    pub fn can_move(&self, side: Side) -> bool {
        self.num_of_side(side.opposite()) < self.cells().len()
    }

    /// All squares `side` may currently add a spot to, in ascending order.
    pub fn legal_moves(&self, side: Side) -> impl Iterator<Item = usize> + '_ {
        (0..self.cells().len()).filter(move |&sq| self.is_legal_sq(side, sq))
    }

    /// Adds a spot of `side` at row `r`, column `c` and resolves any
    /// overflows it causes.
    pub fn add_spot(&mut self, side: Side, r: usize, c: usize) -> Result<(), BoardError> {
        if !self.exists(r, c) {
            return Err(BoardError::IllegalMove {
                side,
                row: r,
                col: c,
                err: IllegalSpot::OutOfBounds,
            });
        }
        self.add_spot_sq(side, self.sq_num(r, c))
    }

    /// Adds a spot of `side` to square number `sq` and resolves any
    /// overflows it causes.
    ///
    /// The legality check happens before anything is modified, so on error
    /// the board is unchanged.
    pub fn add_spot_sq(&mut self, side: Side, sq: usize) -> Result<(), BoardError> {
        self.check_legal(side, sq)
            .map_err(|err| BoardError::IllegalMove {
                side,
                row: self.row(sq),
                col: self.col(sq),
                err,
            })?;
        let steps_before = self.move_count;
        let stranded = self.add_spot_unchecked(side, sq);
        debug!(
            side = %side,
            square = %self.move_string(sq),
            steps = self.move_count - steps_before,
            stranded,
            "Added spot"
        );
        self.announce();
        Ok(())
    }

    /// Adds a spot without checking legality and without notifying.
    ///
    /// `sq` must be one of [`Self::legal_moves()`] for `side`. Returns the
    /// number of spots lost because the game was won mid-cascade.
    pub(crate) fn add_spot_unchecked(&mut self, side: Side, sq: usize) -> u32 {
        self.history.begin_move(&self.grid, self.move_count);
        self.spread(side, sq)
    }

    // Increments `sq` and resolves the resulting chain of overflows.
    //
    // Each entry of `pending` is a square that has overflowed, together with
    // the neighbors it still has to hand a spot to. A neighbor pushed over
    // its capacity overflows right away, before the remaining neighbors of
    // the outer square are visited. Starting from a stable board, no square
    // ever holds more than capacity + 1 spots, so resetting it to one spot
    // loses nothing.
    //
    // Nothing happens after the board is won, not even the reset of a square
    // the winning spot pushed over its capacity. Returns the spots that were
    // taken off an overflowing square but never handed on.
    fn spread(&mut self, side: Side, sq: usize) -> u32 {
        if !self.increment(side, sq) || self.winner().is_some() {
            return 0;
        }
        let mut pending: Vec<Neighbors> = Vec::new();
        self.overflow(side, sq, &mut pending);
        while let Some(remaining) = pending.last_mut() {
            let Some(next) = remaining.next() else {
                pending.pop();
                continue;
            };
            if let Some(winner) = self.winner() {
                let stranded = 1 + pending
                    .iter()
                    .map(|neighbors| neighbors.clone().count() as u32)
                    .sum::<u32>();
                trace!(winner = %winner, stranded, "Board won, cascade stopped");
                return stranded;
            }
            if self.increment(side, next) && self.winner().is_none() {
                self.overflow(side, next, &mut pending);
            }
        }
        0
    }

    // Adds one spot of `side` to `sq`. Returns whether it is now over-full.
    fn increment(&mut self, side: Side, sq: usize) -> bool {
        self.begin_step();
        let spots = self.grid.get(sq).spots() + 1;
        self.grid.put(sq, Cell::owned(side, spots));
        trace!(square = sq, spots, "Increment");
        spots > self.neighbors_sq(sq)
    }

    fn overflow(&mut self, side: Side, sq: usize, pending: &mut Vec<Neighbors>) {
        self.begin_step();
        self.grid.put(sq, Cell::owned(side, 1));
        trace!(square = sq, "Overflow");
        pending.push(self.adjacent(sq));
    }

    fn begin_step(&mut self) {
        self.history.begin_step(&self.grid, self.move_count);
        self.move_count += 1;
    }

    /// Forces the square at row `r`, column `c` to hold `spots` spots of
    /// `owner`, bypassing all legality checks. With zero spots the square
    /// becomes unowned.
    ///
    /// Does not touch the undo history. Panics if the square does not exist.
    pub fn set(&mut self, r: usize, c: usize, spots: u32, owner: Option<Side>) {
        assert!(self.exists(r, c), "Square {} {} does not exist", r, c);
        let sq = self.sq_num(r, c);
        self.grid.put(sq, Cell::new(owner, spots));
        self.announce();
    }

    /// Reverts the most recent entry of the undo history.
    ///
    /// Depending on the [`UndoGranularity`], this is a whole move or a
    /// single step of one.
    pub fn undo(&mut self) -> Result<(), BoardError> {
        let (grid, move_count) = self.history.pop().ok_or(BoardError::NoHistory)?;
        self.grid = grid;
        self.move_count = move_count;
        debug!(move_count, "Undid");
        self.announce();
        Ok(())
    }

    /// The number of atomic mutations applied since construction or the
    /// last clear, not counting those that were undone.
    pub fn move_count(&self) -> usize {
        self.move_count
    }

    /// The number of times [`Self::undo()`] can currently succeed.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.size() == other.size() && self.cells() == other.cells()
    }
}

impl Eq for Board {}

impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Board")
            .field("grid", &self.grid)
            .field("move_count", &self.move_count)
            .field("history", &self.history)
            .field("notifier", &self.notifier.is_some())
            .finish()
    }
}

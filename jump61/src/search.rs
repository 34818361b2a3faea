use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, info};

use crate::{Board, SearchError, Side};

/// Limits for a [`Searcher`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// How many plies to look ahead. Must be at least 1.
    pub depth: u32,
    /// Stop expanding nodes after this many have been visited.
    pub max_nodes: Option<u64>,
    /// Stop expanding nodes once this much time has passed.
    pub movetime: Option<Duration>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 4,
            max_nodes: None,
            movetime: None,
        }
    }
}

/// Whether a ply looks for the highest or the lowest value.
///
/// Red maximizes [`static_eval`], Blue minimizes it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Sense {
    Maximize,
    Minimize,
}

impl Sense {
    pub fn of(side: Side) -> Sense {
        match side {
            Side::Red => Sense::Maximize,
            Side::Blue => Sense::Minimize,
        }
    }

    /// The side that moves on a ply with this sense.
    pub fn side(self) -> Side {
        match self {
            Sense::Maximize => Side::Red,
            Sense::Minimize => Side::Blue,
        }
    }

    pub fn opposite(self) -> Sense {
        match self {
            Sense::Maximize => Sense::Minimize,
            Sense::Minimize => Sense::Maximize,
        }
    }

    fn prefers(self, value: i32, over: i32) -> bool {
        match self {
            Sense::Maximize => value > over,
            Sense::Minimize => value < over,
        }
    }

    fn worst(self) -> i32 {
        match self {
            Sense::Maximize => i32::MIN,
            Sense::Minimize => i32::MAX,
        }
    }
}

impl TryFrom<i8> for Sense {
    type Error = SearchError;

    fn try_from(sense: i8) -> Result<Self, Self::Error> {
        match sense {
            1 => Ok(Sense::Maximize),
            -1 => Ok(Sense::Minimize),
            _ => Err(SearchError::InvalidSense(sense)),
        }
    }
}

impl From<Sense> for i8 {
    fn from(sense: Sense) -> i8 {
        match sense {
            Sense::Maximize => 1,
            Sense::Minimize => -1,
        }
    }
}

/// The move picked by [`Searcher::choose_move()`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    /// Square number of the move.
    pub best_move: usize,
    /// Value of the position after the move, from Red's point of view.
    pub value: i32,
    /// Number of positions visited.
    pub nodes: u64,
    /// False if a node or time limit cut the search short.
    pub complete: bool,
}

/// Estimates how good a position is for Red: the number of squares Red owns
/// minus the number Blue owns.
pub fn static_eval(board: &Board) -> i32 {
    board.num_of_side(Side::Red) as i32 - board.num_of_side(Side::Blue) as i32
}

/// Picks a move for `side` by looking `depth` plies ahead.
pub fn choose_move(board: &Board, side: Side, depth: u32) -> Result<usize, SearchError> {
    let config = SearchConfig {
        depth,
        ..Default::default()
    };
    Searcher::new(config)
        .choose_move(board, side)
        .map(|result| result.best_move)
}

/// Minimax search with alpha-beta pruning.
///
/// Every explored position is a fresh copy of its parent, so the board
/// passed in is never modified. Children are visited in ascending square
/// order and ties keep the earlier move, which makes the result
/// deterministic.
pub struct Searcher {
    config: SearchConfig,
    nodes: u64,
    deadline: Option<Instant>,
    cut_off: bool,
}

impl Searcher {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            nodes: 0,
            deadline: None,
            cut_off: false,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Finds the best move for `side`, which must be the side to move.
    ///
    /// If a limit is hit, the best move among the children explored so far
    /// is returned. At least one child is always explored.
    pub fn choose_move(&mut self, board: &Board, side: Side) -> Result<SearchResult, SearchError> {
        let depth = self.config.depth;
        if depth == 0 {
            return Err(SearchError::ZeroDepth);
        }
        if let Some(winner) = board.winner() {
            return Err(SearchError::GameOver { winner });
        }
        self.start();

        let sense = Sense::of(side);
        let (mut alpha, mut beta) = (i32::MIN, i32::MAX);
        let mut best: Option<(usize, i32)> = None;
        for sq in board.legal_moves(side) {
            if best.is_some() && self.out_of_budget() {
                break;
            }
            let child = Self::child(board, side, sq);
            let value = self.value(&child, depth - 1, sense.opposite(), alpha, beta)?;
            if best.map_or(true, |(_, best_value)| sense.prefers(value, best_value)) {
                debug!(square = %board.move_string(sq), value, "New best move");
                best = Some((sq, value));
                match sense {
                    Sense::Maximize => alpha = alpha.max(value),
                    Sense::Minimize => beta = beta.min(value),
                }
            }
        }

        let (best_move, value) = best.ok_or(SearchError::NoLegalMove { side })?;
        info!(
            side = %side,
            best_move = %board.move_string(best_move),
            value,
            nodes = self.nodes,
            complete = !self.cut_off,
            "Search finished"
        );
        Ok(SearchResult {
            best_move,
            value,
            nodes: self.nodes,
            complete: !self.cut_off,
        })
    }

    /// The value of `board` searched `depth` plies deep, where `sense` is
    /// `1` if the side to move maximizes and `-1` if it minimizes.
    ///
    /// The result is exact if it lies strictly between `alpha` and `beta`,
    /// otherwise it is only a bound.
    pub fn min_max(
        &mut self,
        board: &Board,
        depth: u32,
        sense: i8,
        alpha: i32,
        beta: i32,
    ) -> Result<i32, SearchError> {
        let sense = Sense::try_from(sense)?;
        self.start();
        self.value(board, depth, sense, alpha, beta)
    }

    /// Positions visited by the last search.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    fn start(&mut self) {
        self.nodes = 0;
        self.cut_off = false;
        self.deadline = self.config.movetime.map(|movetime| Instant::now() + movetime);
    }

    fn value(
        &mut self,
        board: &Board,
        depth: u32,
        sense: Sense,
        mut alpha: i32,
        mut beta: i32,
    ) -> Result<i32, SearchError> {
        self.nodes += 1;
        if depth == 0 || board.winner().is_some() || self.out_of_budget() {
            return Ok(static_eval(board));
        }

        let side = sense.side();
        let mut best = sense.worst();
        let mut has_moves = false;
        for sq in board.legal_moves(side) {
            has_moves = true;
            let child = Self::child(board, side, sq);
            let value = self.value(&child, depth - 1, sense.opposite(), alpha, beta)?;
            if sense.prefers(value, best) {
                best = value;
                match sense {
                    Sense::Maximize => alpha = alpha.max(best),
                    Sense::Minimize => beta = beta.min(best),
                }
                if alpha >= beta {
                    break;
                }
            }
        }
        if !has_moves {
            return Err(SearchError::NoLegalMove { side });
        }
        Ok(best)
    }

    fn child(board: &Board, side: Side, sq: usize) -> Board {
        let mut child = Board::scratch_copy(board);
        child.add_spot_unchecked(side, sq);
        child
    }

    fn out_of_budget(&mut self) -> bool {
        let exhausted = self.config.max_nodes.is_some_and(|max| self.nodes >= max)
            || self.deadline.is_some_and(|deadline| Instant::now() >= deadline);
        self.cut_off |= exhausted;
        exhausted
    }
}

use crate::Side;

/// Why a spot cannot be added to a particular square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IllegalSpot {
    OutOfBounds,
    NotYourTurn { to_move: Side },
    OwnedByOpponent,
    UnownedCellFull { spots: u32, capacity: u32 },
    GameOver { winner: Side },
}

impl std::error::Error for IllegalSpot {}

impl std::fmt::Display for IllegalSpot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalSpot::OutOfBounds => write!(f, "Square is outside of the board"),
            IllegalSpot::NotYourTurn { to_move } => write!(f, "It is {}'s turn", to_move),
            IllegalSpot::OwnedByOpponent => write!(f, "Square belongs to the opponent"),
            IllegalSpot::UnownedCellFull { spots, capacity } => write!(
                f,
                "Unowned square already holds {} spots and has only {} neighbors",
                spots, capacity
            ),
            IllegalSpot::GameOver { winner } => {
                write!(f, "The game is already won by {}", winner)
            }
        }
    }
}

/// The error type for mutating a [`Board`](crate::Board).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    IllegalMove {
        side: Side,
        row: usize,
        col: usize,
        err: IllegalSpot,
    },
    NoHistory,
}

impl std::error::Error for BoardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BoardError::IllegalMove { err, .. } => Some(err),
            BoardError::NoHistory => None,
        }
    }
}

impl std::fmt::Display for BoardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoardError::IllegalMove { side, row, col, .. } => {
                write!(f, "Illegal move by {} at {} {}", side, row, col)
            }
            BoardError::NoHistory => write!(f, "There is no move to undo"),
        }
    }
}

/// The error type for [`Searcher`](crate::Searcher).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// A sense other than `1` (maximize) or `-1` (minimize) was given.
    InvalidSense(i8),
    NoLegalMove { side: Side },
    ZeroDepth,
    GameOver { winner: Side },
}

impl std::error::Error for SearchError {}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchError::InvalidSense(sense) => {
                write!(f, "Sense must be 1 or -1, got {}", sense)
            }
            SearchError::NoLegalMove { side } => write!(f, "No legal move for {}", side),
            SearchError::ZeroDepth => write!(f, "Search depth must be at least 1"),
            SearchError::GameOver { winner } => {
                write!(f, "Cannot search a game that {} has already won", winner)
            }
        }
    }
}

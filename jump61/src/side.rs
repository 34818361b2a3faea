use serde::{Deserialize, Serialize};

/// One of the two players contesting the board.
///
/// Red always moves first on a fresh board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Red,
    Blue,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Red, Side::Blue];

    pub fn opposite(self) -> Side {
        match self {
            Side::Red => Side::Blue,
            Side::Blue => Side::Red,
        }
    }

    /// The letter used for this side in the dumped board format.
    pub fn symbol(self) -> char {
        match self {
            Side::Red => 'r',
            Side::Blue => 'b',
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Red => write!(f, "red"),
            Side::Blue => write!(f, "blue"),
        }
    }
}

/// The contents of one square: who owns it and how many spots are on it.
///
/// An unowned cell normally holds a single uncolored spot that either side
/// may claim. A cell with zero spots is always unowned.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    owner: Option<Side>,
    spots: u32,
}

impl Cell {
    /// The cell every square starts out as.
    pub const EMPTY: Cell = Cell {
        owner: None,
        spots: 1,
    };

    /// Creates a cell, dropping the owner if there are no spots.
    pub fn new(owner: Option<Side>, spots: u32) -> Self {
        Self {
            owner: if spots == 0 { None } else { owner },
            spots,
        }
    }

    pub(crate) fn owned(side: Side, spots: u32) -> Self {
        debug_assert!(spots > 0);
        Self {
            owner: Some(side),
            spots,
        }
    }

    pub fn owner(self) -> Option<Side> {
        self.owner
    }

    pub fn spots(self) -> u32 {
        self.spots
    }

    pub fn is_owned_by(self, side: Side) -> bool {
        self.owner == Some(side)
    }

    pub fn symbol(self) -> char {
        self.owner.map_or('-', Side::symbol)
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_spots_are_unowned() {
        assert_eq!(Cell::new(Some(Side::Red), 0), Cell::new(None, 0));
        assert_eq!(Cell::new(Some(Side::Red), 0).owner(), None);
        assert_eq!(Cell::new(Some(Side::Blue), 2).owner(), Some(Side::Blue));
    }

    #[test]
    fn cells_compare_owner_and_spots() {
        assert_eq!(Cell::new(Some(Side::Red), 3), Cell::new(Some(Side::Red), 3));
        assert_ne!(Cell::new(Some(Side::Red), 3), Cell::new(Some(Side::Blue), 3));
        assert_ne!(Cell::new(Some(Side::Red), 3), Cell::new(Some(Side::Red), 2));
        assert_eq!(Cell::default(), Cell::EMPTY);
    }

    #[test]
    fn symbols() {
        assert_eq!(Cell::EMPTY.symbol(), '-');
        assert_eq!(Cell::new(Some(Side::Red), 1).symbol(), 'r');
        assert_eq!(Cell::new(Some(Side::Blue), 1).symbol(), 'b');
        assert_eq!(Side::Red.opposite(), Side::Blue);
    }

    #[test]
    fn side_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Side::Blue).unwrap(), "\"blue\"");
        assert_eq!(
            serde_json::from_str::<Side>("\"red\"").unwrap(),
            Side::Red
        );
    }
}

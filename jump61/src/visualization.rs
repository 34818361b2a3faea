use std::fmt::Write;

use crate::Board;

/// The dumped representation: a `===` line, one line per row with
/// `<spots><symbol> ` for each cell, and a closing `===` line.
impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "===")?;
        for row in self.cells().chunks(self.size()) {
            write!(f, "    ")?;
            for cell in row {
                write!(f, "{}{} ", cell.spots(), cell.symbol())?;
            }
            writeln!(f)?;
        }
        writeln!(f, "===")
    }
}

impl Board {
    /// A rendition for humans, with row numbers in front of each row and
    /// column numbers below the board.
    pub fn to_display_string(&self) -> String {
        let mut result = String::new();
        for (i, row) in self.cells().chunks(self.size()).enumerate() {
            let cells: Vec<String> = row
                .iter()
                .map(|cell| format!("{}{}", cell.spots(), cell.symbol()))
                .collect();
            // Writing to a String can't fail
            let _ = writeln!(result, "{:2} {}", i + 1, cells.join(" "));
        }
        result += "  ";
        for c in 1..=self.size() {
            let _ = write!(result, "{:3}", c);
        }
        result
    }
}

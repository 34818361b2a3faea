use quickcheck::{Arbitrary, Gen};

use crate::Board;

/// A game played from the initial position by both sides choosing among
/// their legal moves.
///
/// Each choice is taken modulo the number of legal moves at that point, so
/// every generated prefix is legal by construction.
#[derive(Clone, Debug)]
pub struct GamePrefix {
    pub size: usize,
    pub choices: Vec<usize>,
    /// Selects a legal move on the resulting board, for properties about
    /// a single move.
    pub next_choice: usize,
}

impl GamePrefix {
    /// Plays the prefix, stopping early if the game is won.
    pub fn play(&self) -> Board {
        let mut board = Board::new(self.size);
        for &choice in &self.choices {
            let Some(sq) = pick(&board, choice) else {
                break;
            };
            board.add_spot_sq(board.whose_move(), sq).unwrap();
        }
        board
    }

    /// A legal move for the side to move on `board`, if there is one.
    pub fn next_move(&self, board: &Board) -> Option<usize> {
        pick(board, self.next_choice)
    }
}

fn pick(board: &Board, choice: usize) -> Option<usize> {
    let moves: Vec<usize> = board.legal_moves(board.whose_move()).collect();
    if moves.is_empty() {
        None
    } else {
        Some(moves[choice % moves.len()])
    }
}

impl Arbitrary for GamePrefix {
    fn arbitrary(g: &mut Gen) -> Self {
        let size = 2 + usize::arbitrary(g) % 4;
        GamePrefix {
            size,
            choices: Vec::arbitrary(g),
            next_choice: usize::arbitrary(g),
        }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let size = self.size;
        let next_choice = self.next_choice;
        Box::new(self.choices.shrink().map(move |choices| GamePrefix {
            size,
            choices,
            next_choice,
        }))
    }
}

//! Rules engine and computer opponent for Jump61, a chain-reaction game on
//! a square grid.
//!
//! A [`Board`] holds the cells, checks and applies moves including their
//! overflow cascades, and can undo them. A [`Searcher`] picks moves with
//! alpha-beta search.
pub use board::*;
pub use errors::*;
pub use search::*;
pub use side::*;

#[cfg(test)]
mod arbitrary;
mod board;
mod errors;
mod search;
mod side;
mod visualization;

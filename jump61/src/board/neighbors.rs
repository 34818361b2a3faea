use std::iter::FusedIterator;

/// A direction in which an overflowing square hands out a spot.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Down,
    Up,
    Right,
    Left,
}

/// The order in which an overflowing square visits its neighbors.
pub const DIRECTIONS: [Direction; 4] = [
    Direction::Down,
    Direction::Up,
    Direction::Right,
    Direction::Left,
];

/// Returns the square next to `sq` in direction `dir`, if it is on the board.
pub(crate) fn neighbor(size: usize, sq: usize, dir: Direction) -> Option<usize> {
    let (r, c) = (sq / size, sq % size);
    match dir {
        Direction::Down => (r + 1 < size).then(|| sq + size),
        Direction::Up => (r > 0).then(|| sq - size),
        Direction::Right => (c + 1 < size).then(|| sq + 1),
        Direction::Left => (c > 0).then(|| sq - 1),
    }
}

/// The number of orthogonal neighbors of the square at 0-based `(r, c)`.
pub(crate) fn capacity(size: usize, r: usize, c: usize) -> u32 {
    u32::from(r > 0) + u32::from(c > 0) + u32::from(r + 1 < size) + u32::from(c + 1 < size)
}

/// Iterates over the squares adjacent to a square, in [`DIRECTIONS`] order.
#[derive(Clone, Debug)]
pub struct Neighbors {
    size: usize,
    sq: usize,
    next_dir: usize,
}

impl Neighbors {
    pub(crate) fn new(size: usize, sq: usize) -> Self {
        Self {
            size,
            sq,
            next_dir: 0,
        }
    }
}

impl Iterator for Neighbors {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while let Some(&dir) = DIRECTIONS.get(self.next_dir) {
            self.next_dir += 1;
            if let Some(n) = neighbor(self.size, self.sq, dir) {
                return Some(n);
            }
        }
        None
    }
}

impl FusedIterator for Neighbors {}

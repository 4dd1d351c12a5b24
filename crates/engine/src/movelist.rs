//! A move list implementation that avoids heap allocations.

use crate::r#move::Move;
use crate::square::Square;
use std::ops::Index;

// Comfortably above the most legal moves any reachable position allows.
const MAX_MOVES: usize = 256;

#[derive(Debug, Clone)]
pub struct MoveList {
    moves: [Move; MAX_MOVES],
    count: usize,
}

impl MoveList {
    pub fn new() -> Self {
        let null = Move::new(Square::new(0, 0), Square::new(0, 0));
        Self {
            moves: [null; MAX_MOVES],
            count: 0,
        }
    }

    pub fn add(&mut self, mv: Move) {
        if self.count < MAX_MOVES {
            self.moves[self.count] = mv;
            self.count += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn as_slice(&self) -> &[Move] {
        &self.moves[0..self.count]
    }

    pub fn contains(&self, mv: Move) -> bool {
        self.as_slice().contains(&mv)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<usize> for MoveList {
    type Output = Move;

    fn index(&self, index: usize) -> &Self::Output {
        &self.as_slice()[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

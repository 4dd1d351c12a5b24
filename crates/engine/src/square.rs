//! Board coordinates and their external notation.

use crate::constants::{FILES, RANKS};
use crate::error::ParseSquareError;
use std::fmt;
use std::str::FromStr;

/// An intersection on the board. Rank 0 is Red's back edge, file 0 is the `a` file.
///
/// Squares may be constructed off the board; every consumer checks
/// [`Square::in_bounds`] before indexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    pub rank: i8,
    pub file: i8,
}

impl Square {
    pub const fn new(rank: i8, file: i8) -> Self {
        Self { rank, file }
    }

    pub fn from_index(index: usize) -> Self {
        let index = index as i8;
        Self::new(index / FILES, index % FILES)
    }

    pub const fn in_bounds(self) -> bool {
        self.rank >= 0 && self.rank < RANKS && self.file >= 0 && self.file < FILES
    }

    /// Row-major index, only meaningful when in bounds.
    pub fn index(self) -> usize {
        (self.rank as usize) * (FILES as usize) + self.file as usize
    }

    /// The square shifted by the given delta, if it stays on the board.
    pub fn offset(self, d_rank: i8, d_file: i8) -> Option<Square> {
        let sq = Square::new(self.rank + d_rank, self.file + d_file);
        sq.in_bounds().then_some(sq)
    }

    /// All 90 squares, rank 0 first.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..RANKS).flat_map(|rank| (0..FILES).map(move |file| Square::new(rank, file)))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.in_bounds() {
            return write!(f, "??");
        }
        write!(f, "{}{}", (b'a' + self.file as u8) as char, self.rank + 1)
    }
}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ParseSquareError::Malformed(s.to_string());
        let mut chars = s.chars();
        let file_char = chars.next().ok_or_else(malformed)?.to_ascii_lowercase();
        if !('a'..='i').contains(&file_char) {
            return Err(malformed());
        }
        let rank_str = chars.as_str();
        if rank_str.is_empty() || !rank_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        let rank: i8 = rank_str.parse().map_err(|_| malformed())?;
        if !(1..=RANKS).contains(&rank) {
            return Err(malformed());
        }
        Ok(Square::new(rank - 1, (file_char as u8 - b'a') as i8))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_corners() {
        assert_eq!("a1".parse::<Square>(), Ok(Square::new(0, 0)));
        assert_eq!("i10".parse::<Square>(), Ok(Square::new(9, 8)));
        assert_eq!("E3".parse::<Square>(), Ok(Square::new(2, 4)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "a", "j1", "a0", "a11", "a1x", "1a", "a-1", "a+1"] {
            assert!(bad.parse::<Square>().is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Square::new(9, 7).to_string(), "h10");
        assert_eq!(Square::new(2, 4).to_string(), "e3");
        assert_eq!(Square::new(-1, 4).to_string(), "??");
    }

    #[test]
    fn test_offset_stays_on_board() {
        let corner = Square::new(0, 0);
        assert_eq!(corner.offset(-1, 0), None);
        assert_eq!(corner.offset(1, 2), Some(Square::new(1, 2)));
        assert_eq!(Square::new(9, 8).offset(0, 1), None);
    }

    #[test]
    fn test_index_round_trip() {
        for sq in Square::all() {
            assert_eq!(Square::from_index(sq.index()), sq);
        }
        assert_eq!(Square::all().count(), 90);
    }
}

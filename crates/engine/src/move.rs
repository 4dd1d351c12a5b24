//! Defines the representation of a move in the engine.

use crate::error::ParseMoveError;
use crate::square::Square;
use std::fmt;
use std::str::FromStr;

/// Represents a single move from one square to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub const fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

/// Accepts `h3e3`, `h3-e3` and `h3 e3`.
impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parts: Vec<&str> = s.split(|c: char| c == '-' || c.is_whitespace()).filter(|p| !p.is_empty()).collect();
        let (from, to) = match parts.as_slice() {
            [from, to] => (*from, *to),
            [joined] => {
                // The second square starts at the first letter after the leading one.
                let split = joined
                    .char_indices()
                    .skip(1)
                    .find(|(_, c)| c.is_ascii_alphabetic())
                    .map(|(i, _)| i)
                    .ok_or_else(|| ParseMoveError::Malformed(s.to_string()))?;
                joined.split_at(split)
            }
            _ => return Err(ParseMoveError::Malformed(s.to_string())),
        };
        Ok(Move::new(from.parse()?, to.parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_forms() {
        let expected = Move::new(Square::new(2, 7), Square::new(2, 4));
        assert_eq!("h3e3".parse::<Move>(), Ok(expected));
        assert_eq!("h3-e3".parse::<Move>(), Ok(expected));
        assert_eq!("  h3 e3 ".parse::<Move>(), Ok(expected));
    }

    #[test]
    fn test_parse_rank_ten() {
        let mv: Move = "i10i9".parse().unwrap();
        assert_eq!(mv, Move::new(Square::new(9, 8), Square::new(8, 8)));
        assert_eq!(mv.to_string(), "i10-i9");
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!("h3".parse::<Move>(), Err(ParseMoveError::Malformed(_))));
        assert!(matches!("h3 e3 e4".parse::<Move>(), Err(ParseMoveError::Malformed(_))));
        assert!(matches!("z3e3".parse::<Move>(), Err(ParseMoveError::Square(_))));
    }
}

//! Movement shapes of each piece kind, independent of board occupancy.
//!
//! A shape rule only looks at the two squares and the mover's color. Zone
//! confinement (palace, river) is part of the shape and is reported as
//! [`MoveError::ZoneViolation`] so callers can tell it apart from a move the
//! piece could never make anywhere.

use crate::constants::{Color, PieceKind, PALACE_FILES};
use crate::error::MoveError;
use crate::square::Square;

pub type ShapeRule = fn(Color, Square, Square) -> Result<(), MoveError>;

/// Maps a piece kind to its shape rule.
pub fn shape_rule(kind: PieceKind) -> ShapeRule {
    match kind {
        PieceKind::General => general_shape,
        PieceKind::Advisor => advisor_shape,
        PieceKind::Elephant => elephant_shape,
        PieceKind::Horse => horse_shape,
        PieceKind::Chariot => line_shape,
        PieceKind::Cannon => line_shape,
        PieceKind::Soldier => soldier_shape,
    }
}

/// Checks the movement pattern of `kind`, including its zone restrictions.
pub fn check_shape(kind: PieceKind, color: Color, from: Square, to: Square) -> Result<(), MoveError> {
    if from == to || !from.in_bounds() || !to.in_bounds() {
        return Err(MoveError::IllegalShape);
    }
    shape_rule(kind)(color, from, to)
}

pub fn is_shape_legal(kind: PieceKind, color: Color, from: Square, to: Square) -> bool {
    check_shape(kind, color, from, to).is_ok()
}

pub fn in_palace(color: Color, sq: Square) -> bool {
    PALACE_FILES.contains(&sq.file) && color.palace_ranks().contains(&sq.rank)
}

/// The square that must be empty for a horse to jump from `from` to `to`.
pub fn horse_leg(from: Square, to: Square) -> Square {
    let (dr, df) = (to.rank - from.rank, to.file - from.file);
    if dr.abs() == 2 {
        Square::new(from.rank + dr / 2, from.file)
    } else {
        Square::new(from.rank, from.file + df / 2)
    }
}

/// The midpoint an elephant steps over.
pub fn elephant_eye(from: Square, to: Square) -> Square {
    Square::new((from.rank + to.rank) / 2, (from.file + to.file) / 2)
}

fn delta(from: Square, to: Square) -> (i8, i8) {
    (to.rank - from.rank, to.file - from.file)
}

fn palace_confined(color: Color, from: Square, to: Square) -> Result<(), MoveError> {
    if in_palace(color, from) && in_palace(color, to) {
        Ok(())
    } else {
        Err(MoveError::ZoneViolation)
    }
}

fn general_shape(color: Color, from: Square, to: Square) -> Result<(), MoveError> {
    let (dr, df) = delta(from, to);
    if dr.abs() + df.abs() != 1 {
        return Err(MoveError::IllegalShape);
    }
    palace_confined(color, from, to)
}

fn advisor_shape(color: Color, from: Square, to: Square) -> Result<(), MoveError> {
    let (dr, df) = delta(from, to);
    if dr.abs() != 1 || df.abs() != 1 {
        return Err(MoveError::IllegalShape);
    }
    palace_confined(color, from, to)
}

fn elephant_shape(color: Color, from: Square, to: Square) -> Result<(), MoveError> {
    let (dr, df) = delta(from, to);
    if dr.abs() != 2 || df.abs() != 2 {
        return Err(MoveError::IllegalShape);
    }
    if color.is_home_rank(from.rank) && color.is_home_rank(to.rank) {
        Ok(())
    } else {
        Err(MoveError::ZoneViolation)
    }
}

fn horse_shape(_color: Color, from: Square, to: Square) -> Result<(), MoveError> {
    let (dr, df) = delta(from, to);
    match (dr.abs(), df.abs()) {
        (1, 2) | (2, 1) => Ok(()),
        _ => Err(MoveError::IllegalShape),
    }
}

/// Chariot and cannon: any distance along a rank or file.
fn line_shape(_color: Color, from: Square, to: Square) -> Result<(), MoveError> {
    if (from.rank == to.rank) != (from.file == to.file) {
        Ok(())
    } else {
        Err(MoveError::IllegalShape)
    }
}

fn soldier_shape(color: Color, from: Square, to: Square) -> Result<(), MoveError> {
    match delta(from, to) {
        (dr, 0) if dr == color.forward() => Ok(()),
        (0, df) if df.abs() == 1 => {
            if color.is_home_rank(from.rank) {
                Err(MoveError::ZoneViolation)
            } else {
                Ok(())
            }
        }
        _ => Err(MoveError::IllegalShape),
    }
}

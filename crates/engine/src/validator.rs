//! Refines a shape-legal move into a context-legal one using board occupancy.
//!
//! Context legality does not consider whether the mover's own general ends up
//! in check; the game settles that by simulating the move.

use crate::board::Board;
use crate::constants::{Color, Piece, PieceKind};
use crate::error::MoveError;
use crate::shape::{self, elephant_eye, horse_leg};
use crate::square::Square;

type ObstructionRule = fn(&Board, Piece, Square, Square) -> Result<(), MoveError>;

fn obstruction_rule(kind: PieceKind) -> ObstructionRule {
    match kind {
        PieceKind::General => general_not_facing,
        PieceKind::Advisor | PieceKind::Soldier => unobstructed,
        PieceKind::Elephant => elephant_eye_clear,
        PieceKind::Horse => horse_leg_clear,
        PieceKind::Chariot => chariot_path_clear,
        PieceKind::Cannon => cannon_screen,
    }
}

/// Checks that the piece on `from` may move to `to` given the board and the side to move.
///
/// Returns the moving piece on success.
pub fn validate(board: &Board, turn: Color, from: Square, to: Square) -> Result<Piece, MoveError> {
    let piece = board.get(from).ok_or(MoveError::NoPieceAtSource)?;
    if piece.color != turn {
        return Err(MoveError::WrongTurn);
    }
    if board.get(to).is_some_and(|target| target.color == piece.color) {
        return Err(MoveError::FriendlyTarget);
    }
    shape::check_shape(piece.kind, piece.color, from, to)?;
    obstruction_rule(piece.kind)(board, piece, from, to)?;
    Ok(piece)
}

/// Number of occupied squares strictly between two squares sharing a rank or file.
pub fn count_between(board: &Board, from: Square, to: Square) -> usize {
    let step_rank = (to.rank - from.rank).signum();
    let step_file = (to.file - from.file).signum();
    let mut count = 0;
    let mut sq = Square::new(from.rank + step_rank, from.file + step_file);
    while sq != to && sq.in_bounds() {
        if !board.is_empty(sq) {
            count += 1;
        }
        sq = Square::new(sq.rank + step_rank, sq.file + step_file);
    }
    count
}

fn unobstructed(_board: &Board, _piece: Piece, _from: Square, _to: Square) -> Result<(), MoveError> {
    Ok(())
}

fn elephant_eye_clear(board: &Board, _piece: Piece, from: Square, to: Square) -> Result<(), MoveError> {
    if board.is_empty(elephant_eye(from, to)) {
        Ok(())
    } else {
        Err(MoveError::Blocked)
    }
}

fn horse_leg_clear(board: &Board, _piece: Piece, from: Square, to: Square) -> Result<(), MoveError> {
    if board.is_empty(horse_leg(from, to)) {
        Ok(())
    } else {
        Err(MoveError::Blocked)
    }
}

fn chariot_path_clear(board: &Board, _piece: Piece, from: Square, to: Square) -> Result<(), MoveError> {
    if count_between(board, from, to) == 0 {
        Ok(())
    } else {
        Err(MoveError::Blocked)
    }
}

fn cannon_screen(board: &Board, _piece: Piece, from: Square, to: Square) -> Result<(), MoveError> {
    // Quiet moves slide like a chariot; captures need exactly one screen.
    let required = if board.is_empty(to) { 0 } else { 1 };
    if count_between(board, from, to) == required {
        Ok(())
    } else {
        Err(MoveError::Blocked)
    }
}

/// Scans from `to` toward the opposing back edge; the first piece met must not be the
/// opposing general. The general's own vacated square does not block.
fn general_not_facing(board: &Board, piece: Piece, from: Square, to: Square) -> Result<(), MoveError> {
    let step = piece.color.forward();
    let mut sq = Square::new(to.rank + step, to.file);
    while sq.in_bounds() {
        if sq != from {
            if let Some(found) = board.get(sq) {
                if found.is_general() && found.color != piece.color {
                    return Err(MoveError::FlyingGeneralViolation);
                }
                return Ok(());
            }
        }
        sq = Square::new(sq.rank + step, sq.file);
    }
    Ok(())
}

//! Detects whether a general is under attack.

use crate::board::Board;
use crate::constants::{Color, PieceKind};
use crate::shape::{self, elephant_eye, horse_leg};
use crate::square::Square;

const ORTHOGONAL: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ELEPHANT_STEPS: [(i8, i8); 4] = [(2, 2), (2, -2), (-2, 2), (-2, -2)];
const HORSE_JUMPS: [(i8, i8); 8] = [(2, 1), (2, -1), (-2, 1), (-2, -1), (1, 2), (1, -2), (-1, 2), (-1, -2)];

/// Whether `color`'s general, standing on `general`, is attacked.
///
/// Also true when the two generals face each other on an open file.
/// Never mutates the board.
pub fn is_in_check(board: &Board, general: Square, color: Color) -> bool {
    is_attacked_by(board, general, color.opponent()) || generals_facing(board, general, color)
}

/// Checks if `sq` is attacked by any piece of `attacker`.
pub fn is_attacked_by(board: &Board, sq: Square, attacker: Color) -> bool {
    attacked_by_horse(board, sq, attacker)
        || attacked_along_lines(board, sq, attacker)
        || attacked_by_stepper(board, sq, attacker)
}

fn holds(board: &Board, sq: Square, kind: PieceKind, color: Color) -> bool {
    board.get(sq).is_some_and(|p| p.kind == kind && p.color == color)
}

fn attacked_by_horse(board: &Board, sq: Square, attacker: Color) -> bool {
    HORSE_JUMPS.iter().any(|&(dr, df)| {
        sq.offset(dr, df).is_some_and(|from| {
            holds(board, from, PieceKind::Horse, attacker) && board.is_empty(horse_leg(from, sq))
        })
    })
}

/// Chariots hit the first piece on a line; cannons hit the piece right after the screen.
fn attacked_along_lines(board: &Board, sq: Square, attacker: Color) -> bool {
    for (dr, df) in ORTHOGONAL {
        let mut found_screen = false;
        let mut cur = sq.offset(dr, df);
        while let Some(at) = cur {
            if let Some(piece) = board.get(at) {
                if !found_screen {
                    if piece.kind == PieceKind::Chariot && piece.color == attacker {
                        return true;
                    }
                    found_screen = true;
                } else {
                    if piece.kind == PieceKind::Cannon && piece.color == attacker {
                        return true;
                    }
                    break;
                }
            }
            cur = at.offset(dr, df);
        }
    }
    false
}

/// Soldiers, advisors, elephants and generals: short moves whose shape rule decides.
fn attacked_by_stepper(board: &Board, sq: Square, attacker: Color) -> bool {
    let candidates = ORTHOGONAL
        .iter()
        .map(|&d| (d, PieceKind::Soldier))
        .chain(ORTHOGONAL.iter().map(|&d| (d, PieceKind::General)))
        .chain(DIAGONAL.iter().map(|&d| (d, PieceKind::Advisor)))
        .chain(ELEPHANT_STEPS.iter().map(|&d| (d, PieceKind::Elephant)));

    for ((dr, df), kind) in candidates {
        let Some(from) = sq.offset(dr, df) else {
            continue;
        };
        if !holds(board, from, kind, attacker) || !shape::is_shape_legal(kind, attacker, from, sq) {
            continue;
        }
        if kind == PieceKind::Elephant && !board.is_empty(elephant_eye(from, sq)) {
            continue;
        }
        return true;
    }
    false
}

/// Scans forward from `general` along its file; facing if the first piece is the other general.
pub fn generals_facing(board: &Board, general: Square, color: Color) -> bool {
    let step = color.forward();
    let mut cur = general.offset(step, 0);
    while let Some(at) = cur {
        if let Some(piece) = board.get(at) {
            return piece.is_general() && piece.color != color;
        }
        cur = at.offset(step, 0);
    }
    false
}

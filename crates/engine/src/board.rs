//! The core board representation for the Xiangqi rules engine.

use crate::constants::{Color, Piece, PieceKind, FILES, NUM_SQUARES, RANKS, START_FEN};
use crate::error::FenError;
use crate::square::Square;
use once_cell::sync::Lazy;
use std::fmt;

static STARTING_BOARD: Lazy<Board> = Lazy::new(|| {
    let mut board = Board::empty();
    let back_rank = [
        PieceKind::Chariot,
        PieceKind::Horse,
        PieceKind::Elephant,
        PieceKind::Advisor,
        PieceKind::General,
        PieceKind::Advisor,
        PieceKind::Elephant,
        PieceKind::Horse,
        PieceKind::Chariot,
    ];
    for color in [Color::Red, Color::Black] {
        // Ranks as seen from this color's back edge.
        let rank = |r: i8| if color == Color::Red { r } else { RANKS - 1 - r };
        for (file, kind) in back_rank.iter().enumerate() {
            board.set(Square::new(rank(0), file as i8), Some(Piece::new(*kind, color)));
        }
        for file in [1, 7] {
            board.set(Square::new(rank(2), file), Some(Piece::new(PieceKind::Cannon, color)));
        }
        for file in (0..FILES).step_by(2) {
            board.set(Square::new(rank(3), file), Some(Piece::new(PieceKind::Soldier, color)));
        }
    }
    board
});

/// A 10x9 grid of optional pieces. Pure storage, no rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [Option<Piece>; NUM_SQUARES],
}

impl Board {
    pub fn empty() -> Self {
        Self {
            cells: [None; NUM_SQUARES],
        }
    }

    /// The canonical starting layout.
    pub fn starting() -> Self {
        *STARTING_BOARD
    }

    pub fn in_bounds(&self, sq: Square) -> bool {
        sq.in_bounds()
    }

    /// The piece on `sq`; off-board squares are empty.
    pub fn get(&self, sq: Square) -> Option<Piece> {
        if sq.in_bounds() {
            self.cells[sq.index()]
        } else {
            None
        }
    }

    /// Replaces the content of `sq`, returning what was there before.
    /// Writes to off-board squares are ignored.
    pub fn set(&mut self, sq: Square, piece: Option<Piece>) -> Option<Piece> {
        if !sq.in_bounds() {
            return None;
        }
        std::mem::replace(&mut self.cells[sq.index()], piece)
    }

    pub fn is_empty(&self, sq: Square) -> bool {
        self.get(sq).is_none()
    }

    /// Iterates over every occupied square, rank 0 first.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, cell)| cell.map(|piece| (Square::from_index(i), piece)))
    }

    /// Full scan for a color's general. The game keeps a cache of these.
    pub fn find_general(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, piece)| piece.is_general() && piece.color == color)
            .map(|(sq, _)| sq)
    }

    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        parse_fen(fen).map(|(board, _)| board)
    }

    /// The piece placement field of FEN, rank 10 first.
    pub fn to_fen(&self) -> String {
        let mut fen = String::with_capacity(96);
        for rank in (0..RANKS).rev() {
            let mut empty_count = 0;
            for file in 0..FILES {
                match self.get(Square::new(rank, file)) {
                    None => empty_count += 1,
                    Some(piece) => {
                        if empty_count > 0 {
                            fen.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        fen.push(piece.to_fen_char());
                    }
                }
            }
            if empty_count > 0 {
                fen.push_str(&empty_count.to_string());
            }
            if rank > 0 {
                fen.push('/');
            }
        }
        fen
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::starting()
    }
}

/// Parses a FEN string into a board and the side to move.
///
/// Only the placement field and the optional side field are read; a missing
/// side field means Red moves.
pub fn parse_fen(fen: &str) -> Result<(Board, Color), FenError> {
    let mut board = Board::empty();
    let mut parts = fen.split_whitespace();

    let layout = parts.next().unwrap_or("");
    let rows: Vec<&str> = layout.split('/').collect();
    if rows.len() != RANKS as usize {
        return Err(FenError::RankCount(rows.len()));
    }
    for (row, text) in rows.iter().enumerate() {
        let rank = RANKS - 1 - row as i8;
        let mut file: usize = 0;
        for ch in text.chars() {
            if let Some(digit) = ch.to_digit(10) {
                file += digit as usize;
            } else {
                let piece = Piece::from_fen_char(ch).ok_or(FenError::InvalidChar(ch))?;
                if file < FILES as usize {
                    board.set(Square::new(rank, file as i8), Some(piece));
                }
                file += 1;
            }
        }
        if file != FILES as usize {
            return Err(FenError::FileCount {
                rank: rank as usize + 1,
                files: file,
            });
        }
    }

    let side = match parts.next() {
        None | Some("w") | Some("r") => Color::Red,
        Some("b") => Color::Black,
        Some(other) => return Err(FenError::InvalidSide(other.to_string())),
    };
    Ok((board, side))
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "    +-------------------+")?;
        for rank in (0..RANKS).rev() {
            write!(f, "{:>3} | ", rank + 1)?;
            for file in 0..FILES {
                let c = self.get(Square::new(rank, file)).map_or('.', Piece::to_fen_char);
                write!(f, "{} ", c)?;
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "    +-------------------+")?;
        writeln!(f, "      a b c d e f g h i")
    }
}

/// Placement field of the canonical start position.
pub fn start_placement() -> &'static str {
    START_FEN.split_whitespace().next().unwrap_or(START_FEN)
}

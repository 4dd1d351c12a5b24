//! The game engine: turn order, move application and terminal detection.

use crate::board::{self, Board};
use crate::check;
use crate::config::Config;
use crate::constants::{Color, Piece};
use crate::error::{FenError, MoveError};
use crate::movelist::MoveList;
use crate::r#move::Move;
use crate::shape;
use crate::square::Square;
use crate::validator;
use log::{debug, info, trace};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Unfinished,
    RedWon,
    BlackWon,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        self != Outcome::Unfinished
    }

    pub fn winner(self) -> Option<Color> {
        match self {
            Outcome::Unfinished => None,
            Outcome::RedWon => Some(Color::Red),
            Outcome::BlackWon => Some(Color::Black),
        }
    }

    fn won_by(color: Color) -> Self {
        match color {
            Color::Red => Outcome::RedWon,
            Color::Black => Outcome::BlackWon,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Outcome::Unfinished => "UNFINISHED",
            Outcome::RedWon => "RED_WON",
            Outcome::BlackWon => "BLACK_WON",
        })
    }
}

/// Everything needed to take back a simulated move.
#[derive(Debug, Clone, Copy)]
struct Undo {
    mv: Move,
    moved: Piece,
    captured: Option<Piece>,
}

/// A single game. Owns the board; callers only ever see it through `&Board`.
#[derive(Debug, Clone)]
pub struct Engine {
    board: Board,
    /// Cached general squares, indexed by `Color::index`.
    generals: [Square; 2],
    turn: Color,
    outcome: Outcome,
    move_count: usize,
}

impl Engine {
    /// A new game from the canonical starting layout, Red to move.
    pub fn new() -> Self {
        Self {
            board: Board::starting(),
            generals: [Square::new(0, 4), Square::new(9, 4)],
            turn: Color::Red,
            outcome: Outcome::Unfinished,
            move_count: 0,
        }
    }

    pub fn with_config(config: &Config) -> Result<Self, FenError> {
        Self::from_fen(&config.start_fen)
    }

    /// A game from an arbitrary position.
    ///
    /// Each side needs exactly one general inside its own palace, and the side
    /// not on move may not already be in check. A side to move that has no
    /// legal move has already lost.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let (board, turn) = board::parse_fen(fen)?;
        let mut generals = [Square::new(0, 0); 2];
        for color in [Color::Red, Color::Black] {
            let mut found = board
                .pieces()
                .filter(|(_, piece)| piece.is_general() && piece.color == color)
                .map(|(sq, _)| sq);
            generals[color.index()] = found.next().ok_or(FenError::MissingGeneral(color.name()))?;
            if found.next().is_some() {
                return Err(FenError::DuplicateGeneral(color.name()));
            }
            if !shape::in_palace(color, generals[color.index()]) {
                return Err(FenError::GeneralOutsidePalace(color.name()));
            }
        }

        let mut engine = Self {
            board,
            generals,
            turn,
            outcome: Outcome::Unfinished,
            move_count: 0,
        };
        let waiting = turn.opponent();
        if engine.is_in_check(waiting) {
            return Err(FenError::WaitingSideInCheck(waiting.name()));
        }
        if !engine.has_legal_move() {
            engine.outcome = Outcome::won_by(waiting);
            info!("{} has no legal move in the given position: {}", turn, engine.outcome);
        }
        Ok(engine)
    }

    /// Attempts a move for the side to move, returning whether it was applied.
    pub fn attempt_move(&mut self, from: Square, to: Square) -> bool {
        self.try_move(from, to).is_ok()
    }

    /// Like [`Engine::attempt_move`], but reports why a move was rejected.
    ///
    /// On error the game is exactly as it was before the call.
    pub fn try_move(&mut self, from: Square, to: Square) -> Result<(), MoveError> {
        if self.outcome.is_terminal() {
            return Err(MoveError::GameOver);
        }
        let mv = Move::new(from, to);
        if let Err(err) = self.make_move(mv) {
            trace!("rejected {} for {}: {}", mv, self.turn, err);
            return Err(err);
        }

        let mover = self.turn;
        self.turn = mover.opponent();
        self.move_count += 1;
        debug!("{} played {} (move {})", mover, mv, self.move_count);

        if !self.has_legal_move() {
            // Checkmate and stalemate both lose for the side left without a move.
            self.outcome = Outcome::won_by(mover);
            info!("{} has no legal move, game over: {}", self.turn, self.outcome);
        }
        Ok(())
    }

    /// Full legality test for the side to move, without committing the move.
    pub fn validate_move(&mut self, from: Square, to: Square) -> Result<(), MoveError> {
        if self.outcome.is_terminal() {
            return Err(MoveError::GameOver);
        }
        let undo = self.make_move(Move::new(from, to))?;
        self.unmake_move(undo);
        Ok(())
    }

    /// Every move the side to move may make.
    pub fn legal_moves(&mut self) -> MoveList {
        let mut moves = MoveList::new();
        if self.outcome.is_terminal() {
            return moves;
        }
        for from in self.own_squares() {
            for to in Square::all() {
                let mv = Move::new(from, to);
                if let Ok(undo) = self.make_move(mv) {
                    self.unmake_move(undo);
                    moves.add(mv);
                }
            }
        }
        moves
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        check::is_in_check(&self.board, self.generals[color.index()], color)
    }

    pub fn get_game_state(&self) -> Outcome {
        self.outcome
    }

    pub fn get_turn(&self) -> Color {
        self.turn
    }

    /// Read-only view of the board for rendering.
    pub fn snapshot_board(&self) -> &Board {
        &self.board
    }

    pub fn general_square(&self, color: Color) -> Square {
        self.generals[color.index()]
    }

    pub fn move_count(&self) -> usize {
        self.move_count
    }

    /// Current position in FEN, including the side to move.
    pub fn to_fen(&self) -> String {
        let side = match self.turn {
            Color::Red => 'w',
            Color::Black => 'b',
        };
        format!("{} {}", self.board.to_fen(), side)
    }

    /// Validates `mv` for the side to move and applies it to the board.
    ///
    /// This is the one place a move is simulated: a move that leaves the
    /// mover's general in check is taken back before returning the error.
    /// The turn is not flipped.
    fn make_move(&mut self, mv: Move) -> Result<Undo, MoveError> {
        let piece = validator::validate(&self.board, self.turn, mv.from, mv.to)?;
        let captured = self.board.set(mv.to, Some(piece));
        self.board.set(mv.from, None);
        if piece.is_general() {
            self.generals[piece.color.index()] = mv.to;
        }
        let undo = Undo {
            mv,
            moved: piece,
            captured,
        };

        if self.is_in_check(piece.color) {
            self.unmake_move(undo);
            return Err(MoveError::SelfCheck);
        }
        Ok(undo)
    }

    fn unmake_move(&mut self, undo: Undo) {
        self.board.set(undo.mv.from, Some(undo.moved));
        self.board.set(undo.mv.to, undo.captured);
        if undo.moved.is_general() {
            self.generals[undo.moved.color.index()] = undo.mv.from;
        }
    }

    fn has_legal_move(&mut self) -> bool {
        for from in self.own_squares() {
            for to in Square::all() {
                if let Ok(undo) = self.make_move(Move::new(from, to)) {
                    self.unmake_move(undo);
                    return true;
                }
            }
        }
        false
    }

    /// Squares holding a piece of the side to move.
    fn own_squares(&self) -> Vec<Square> {
        self.board
            .pieces()
            .filter(|(_, piece)| piece.color == self.turn)
            .map(|(sq, _)| sq)
            .collect()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

pub mod board;
pub mod check;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod movelist;
pub mod r#move;
pub mod shape;
pub mod square;
pub mod validator;

pub use board::Board;
pub use config::Config;
pub use constants::{Color, Piece, PieceKind};
pub use engine::{Engine, Outcome};
pub use error::{FenError, MoveError, ParseMoveError, ParseSquareError};
pub use movelist::MoveList;
pub use r#move::Move;
pub use square::Square;

/// Starts a game from the canonical layout with Red to move.
pub fn new_game() -> Engine {
    Engine::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_and_reject_move() {
        let mut engine = new_game();
        let before = *engine.snapshot_board();
        let from: Square = "b1".parse().unwrap();
        let to: Square = "c3".parse().unwrap();

        assert!(!engine.attempt_move(from, "b3".parse().unwrap()));
        assert_eq!(engine.snapshot_board(), &before);

        assert!(engine.attempt_move(from, to));
        assert_eq!(engine.snapshot_board().get(from), None);
        assert_eq!(engine.snapshot_board().get(to), before.get(from));
    }
}

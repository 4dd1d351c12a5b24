//! Rules integration tests.
//!
//! These drive the public engine API only: construct a game, play moves
//! in notation, and inspect the outcome, turn and board.

use xiangqi_engine::{new_game, Board, Color, Engine, FenError, MoveError, Outcome, Piece, PieceKind, Square};

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

fn play(engine: &mut Engine, from: &str, to: &str) -> Result<(), MoveError> {
    engine.try_move(sq(from), sq(to))
}

// =============================================================================
// Full game
// =============================================================================

/// A short game: central cannon pressure, a double check answered by an
/// advisor, then a chariot lift that mates along the back rank.
#[test]
fn test_full_game_ends_in_red_win() {
    let moves = [
        ("h3", "e3"),
        ("h8", "g8"),
        ("h1", "i3"),
        ("i10", "i9"),
        ("i1", "h1"),
        ("h10", "i8"),
        ("e3", "e7"),
        ("i8", "g9"),
        ("b3", "e3"),
        ("g8", "h8"),
        ("h1", "h8"),
        ("b8", "b6"),
        ("h8", "e8"),
        ("f10", "e9"),
        ("a1", "a2"),
        ("a7", "a6"),
        ("a2", "h2"),
        ("a6", "a5"),
        ("h2", "h9"),
        ("c7", "c6"),
        ("h9", "g9"),
        ("c6", "c5"),
        ("g9", "g10"),
    ];

    let mut engine = new_game();
    for (i, (from, to)) in moves.iter().enumerate() {
        assert_eq!(engine.get_game_state(), Outcome::Unfinished, "game ended before move {}", i + 1);
        let mover = engine.get_turn();
        assert!(
            engine.attempt_move(sq(from), sq(to)),
            "move {} {}-{} was rejected: {:?}",
            i + 1,
            from,
            to,
            engine.clone().try_move(sq(from), sq(to))
        );
        assert_eq!(engine.get_turn(), mover.opponent());
    }

    assert_eq!(engine.get_game_state(), Outcome::RedWon);
    assert!(engine.is_in_check(Color::Black));
    assert_eq!(engine.move_count(), moves.len());
    assert_eq!(play(&mut engine, "e10", "f10"), Err(MoveError::GameOver));
    assert!(engine.legal_moves().is_empty());
}

#[test]
fn test_double_check_leaves_single_defence() {
    let mut engine = new_game();
    for (from, to) in [
        ("h3", "e3"),
        ("h8", "g8"),
        ("h1", "i3"),
        ("i10", "i9"),
        ("i1", "h1"),
        ("h10", "i8"),
        ("e3", "e7"),
        ("i8", "g9"),
        ("b3", "e3"),
        ("g8", "h8"),
        ("h1", "h8"),
        ("b8", "b6"),
        ("h8", "e8"),
    ] {
        play(&mut engine, from, to).unwrap();
    }
    assert!(engine.is_in_check(Color::Black));
    let replies: Vec<String> = engine.legal_moves().iter().map(|mv| mv.to_string()).collect();
    assert_eq!(replies, vec!["d10-e9", "f10-e9"]);
    // Capturing the chariot still leaves the cannon's screen in place.
    assert_eq!(play(&mut engine, "g9", "e8"), Err(MoveError::SelfCheck));
    assert_eq!(play(&mut engine, "c10", "e8"), Err(MoveError::SelfCheck));
}

// =============================================================================
// Terminal detection
// =============================================================================

#[test]
fn test_checkmate_awards_win_to_mover() {
    let mut engine = Engine::from_fen("4k4/1R7/9/9/9/9/9/9/9/R2K5 w").unwrap();
    assert_eq!(play(&mut engine, "a1", "a10"), Ok(()));
    assert!(engine.is_in_check(Color::Black));
    assert_eq!(engine.get_game_state(), Outcome::RedWon);
    assert_eq!(engine.get_turn(), Color::Black);
}

#[test]
fn test_stalemate_is_a_loss() {
    let mut engine = Engine::from_fen("3k5/4r4/9/9/9/9/9/9/4R4/4K4 w").unwrap();
    assert_eq!(play(&mut engine, "e2", "e9"), Ok(()));
    assert!(!engine.is_in_check(Color::Black));
    assert_eq!(engine.get_game_state(), Outcome::RedWon);
}

#[test]
fn test_black_can_win() {
    // Mirror of the back-rank mate with colors swapped.
    let mut engine = Engine::from_fen("r2k5/9/9/9/9/9/9/9/1r7/4K4 b").unwrap();
    assert_eq!(play(&mut engine, "a10", "a1"), Ok(()));
    assert_eq!(engine.get_game_state(), Outcome::BlackWon);
    assert_eq!(play(&mut engine, "e1", "f1"), Err(MoveError::GameOver));
}

#[test]
fn test_position_already_mated() {
    // Black to move, mated by the chariots on a10 and b9.
    let mut engine = Engine::from_fen("R3k4/1R7/9/9/9/9/9/9/9/3K5 b").unwrap();
    assert!(engine.is_in_check(Color::Black));
    assert_eq!(engine.get_game_state(), Outcome::RedWon);
    assert!(engine.legal_moves().is_empty());
    assert_eq!(play(&mut engine, "e10", "e9"), Err(MoveError::GameOver));
    assert_eq!(engine.get_turn(), Color::Black);
}

#[test]
fn test_position_already_stalemated() {
    // Black general on d10 is not in check, but e10 and d9 are covered by the chariot.
    let mut engine = Engine::from_fen("3k5/4R4/9/9/9/9/9/9/9/4K4 b").unwrap();
    assert!(!engine.is_in_check(Color::Black));
    assert_eq!(engine.get_game_state(), Outcome::RedWon);
    assert!(engine.legal_moves().is_empty());
}

#[test]
fn test_generals_outside_palace_rejected() {
    assert_eq!(
        Engine::from_fen("4K4/9/9/9/9/9/9/9/9/4k4 w").unwrap_err(),
        FenError::GeneralOutsidePalace("red")
    );
}

// =============================================================================
// Piece laws
// =============================================================================

#[test]
fn test_cannon_screen_law() {
    let mut engine = new_game();
    // Quiet move past a piece.
    assert_eq!(play(&mut engine, "b3", "b9"), Err(MoveError::Blocked));
    // Capture without a screen.
    assert_eq!(play(&mut engine, "h3", "h8"), Err(MoveError::Blocked));
    // Capture over exactly one screen.
    assert_eq!(play(&mut engine, "b3", "b10"), Ok(()));
    assert_eq!(
        engine.snapshot_board().get(sq("b10")),
        Some(Piece::new(PieceKind::Cannon, Color::Red))
    );

    // Capture over two screens.
    let mut engine = Engine::from_fen("rnbakabnr/9/1c5c1/p1p1p1p1p/1P7/9/P1P1P1P1P/1C5C1/9/RNBAKABNR w").unwrap();
    assert_eq!(play(&mut engine, "b3", "b10"), Err(MoveError::Blocked));
}

#[test]
fn test_elephant_eye_law() {
    let mut engine = new_game();
    assert_eq!(play(&mut engine, "c1", "a3"), Ok(()));

    for blocker in ["1N7", "1n7"] {
        let fen = format!("rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/{}/R1BAKABNR w", blocker);
        let mut engine = Engine::from_fen(&fen).unwrap();
        assert_eq!(play(&mut engine, "c1", "a3"), Err(MoveError::Blocked));
    }
}

#[test]
fn test_elephant_cannot_cross_river() {
    let mut engine = Engine::from_fen("4k4/9/9/9/9/2B6/9/9/9/3K5 w").unwrap();
    assert_eq!(play(&mut engine, "c5", "e7"), Err(MoveError::ZoneViolation));
    assert_eq!(play(&mut engine, "c5", "e3"), Ok(()));
}

#[test]
fn test_horse_leg_blocks() {
    let mut engine = new_game();
    // Leg c1 holds the elephant.
    assert_eq!(play(&mut engine, "b1", "d2"), Err(MoveError::Blocked));
    assert_eq!(play(&mut engine, "b1", "c3"), Ok(()));
}

#[test]
fn test_soldier_gains_sideways_after_river() {
    let mut engine = new_game();
    assert_eq!(play(&mut engine, "c4", "d4"), Err(MoveError::ZoneViolation));
    for (from, to) in [("c4", "c5"), ("a7", "a6"), ("c5", "c6"), ("a6", "a5")] {
        play(&mut engine, from, to).unwrap();
    }
    assert_eq!(play(&mut engine, "c6", "c5"), Err(MoveError::IllegalShape));
    assert_eq!(play(&mut engine, "c6", "d6"), Ok(()));
}

#[test]
fn test_general_stays_in_palace() {
    let mut engine = Engine::from_fen("3k5/9/9/9/9/9/9/4K4/9/9 w").unwrap();
    assert_eq!(play(&mut engine, "e3", "e4"), Err(MoveError::ZoneViolation));
    assert_eq!(play(&mut engine, "e3", "f3"), Ok(()));
}

// =============================================================================
// Flying general and self-check
// =============================================================================

#[test]
fn test_general_may_not_step_onto_open_file() {
    let mut engine = Engine::from_fen("4k4/9/9/9/9/9/9/9/9/3K5 w").unwrap();
    assert_eq!(play(&mut engine, "d1", "e1"), Err(MoveError::FlyingGeneralViolation));
    assert_eq!(engine.general_square(Color::Red), sq("d1"));
}

#[test]
fn test_last_blocker_may_not_leave_file() {
    let fen = "4k4/9/9/9/4N4/9/9/9/9/4K4 w";
    let mut engine = Engine::from_fen(fen).unwrap();
    assert_eq!(play(&mut engine, "e6", "c7"), Err(MoveError::SelfCheck));
    assert_eq!(engine.to_fen(), fen);
}

#[test]
fn test_pinned_piece_rejected_without_side_effects() {
    let fen = "3k5/4r4/9/9/9/9/9/9/4R4/4K4 w";
    let mut engine = Engine::from_fen(fen).unwrap();
    let board_before: Board = *engine.snapshot_board();
    assert!(!engine.attempt_move(sq("e2"), sq("a2")));
    assert_eq!(engine.snapshot_board(), &board_before);
    assert_eq!(engine.get_turn(), Color::Red);
    assert_eq!(engine.get_game_state(), Outcome::Unfinished);
    assert_eq!(engine.validate_move(sq("e2"), sq("e5")), Ok(()));
    assert_eq!(engine.snapshot_board(), &board_before);
}

#[test]
fn test_general_may_not_step_into_attack() {
    // Stepping onto the file of the black chariot is self-check.
    let mut engine = Engine::from_fen("5k3/4r4/9/9/9/9/9/9/9/3K5 w").unwrap();
    assert!(!engine.is_in_check(Color::Red));
    assert_eq!(play(&mut engine, "d1", "e1"), Err(MoveError::SelfCheck));
    assert_eq!(play(&mut engine, "d1", "d2"), Ok(()));
}

// =============================================================================
// Rejections
// =============================================================================

#[test]
fn test_rejection_taxonomy() {
    let mut engine = new_game();
    assert_eq!(play(&mut engine, "e5", "e6"), Err(MoveError::NoPieceAtSource));
    assert_eq!(play(&mut engine, "a7", "a6"), Err(MoveError::WrongTurn));
    assert_eq!(play(&mut engine, "a1", "b1"), Err(MoveError::FriendlyTarget));
    assert_eq!(play(&mut engine, "a1", "b2"), Err(MoveError::IllegalShape));
    assert_eq!(play(&mut engine, "a1", "a5"), Err(MoveError::Blocked));
    assert_eq!(play(&mut engine, "d1", "c2"), Err(MoveError::ZoneViolation));
    assert_eq!(engine.move_count(), 0);
    assert_eq!(engine.snapshot_board(), &Board::starting());
}

#[test]
fn test_turns_alternate() {
    let mut engine = new_game();
    assert_eq!(play(&mut engine, "h3", "e3"), Ok(()));
    assert_eq!(play(&mut engine, "e3", "e7"), Err(MoveError::WrongTurn));
    assert_eq!(play(&mut engine, "h8", "e8"), Ok(()));
    assert_eq!(engine.get_turn(), Color::Red);
}

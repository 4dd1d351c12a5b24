//! Error types surfaced by the engine.

use thiserror::Error;

/// Why a move was rejected. Rejections never leave a partial state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("no piece at source square")]
    NoPieceAtSource,
    #[error("piece belongs to the side not on move")]
    WrongTurn,
    #[error("target square holds a friendly piece")]
    FriendlyTarget,
    #[error("piece cannot move in that pattern")]
    IllegalShape,
    #[error("path is blocked")]
    Blocked,
    #[error("piece cannot leave its zone")]
    ZoneViolation,
    #[error("generals would face each other")]
    FlyingGeneralViolation,
    #[error("move leaves own general in check")]
    SelfCheck,
    #[error("game is already over")]
    GameOver,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseSquareError {
    #[error("square must be a file a-i followed by a rank 1-10, got '{0}'")]
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseMoveError {
    #[error("move must name two squares, got '{0}'")]
    Malformed(String),
    #[error(transparent)]
    Square(#[from] ParseSquareError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("invalid piece character '{0}'")]
    InvalidChar(char),
    #[error("expected 10 ranks, found {0}")]
    RankCount(usize),
    #[error("rank {rank} has {files} files, expected 9")]
    FileCount { rank: usize, files: usize },
    #[error("invalid side to move '{0}'")]
    InvalidSide(String),
    #[error("no {0} general on the board")]
    MissingGeneral(&'static str),
    #[error("more than one {0} general on the board")]
    DuplicateGeneral(&'static str),
    #[error("{0} general is outside its palace")]
    GeneralOutsidePalace(&'static str),
    #[error("{0} is in check but it is not their move")]
    WaitingSideInCheck(&'static str),
}

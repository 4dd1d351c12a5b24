//! Configuration for the Xiangqi rules engine.

use crate::constants::START_FEN;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Position a new game starts from, in FEN.
    pub start_fen: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            start_fen: START_FEN.to_string(),
        }
    }
}

impl Config {
    pub fn with_start_fen(fen: impl Into<String>) -> Self {
        Self { start_fen: fen.into() }
    }
}

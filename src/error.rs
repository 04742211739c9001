//! Error types for the Go engine.

use thiserror::Error;

/// Reason a move was rejected by [`crate::game::GameState::make_move`].
///
/// Every rejection leaves the game state exactly as it was before the attempt.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("game is over, no more moves can be played")]
    GameOver,

    #[error("point ({row}, {col}) is out of bounds")]
    OutOfBounds { row: usize, col: usize },

    #[error("point ({row}, {col}) is already occupied")]
    Occupied { row: usize, col: usize },

    #[error("self-capture is not allowed")]
    SelfCapture,

    #[error("move violates ko")]
    Ko,
}

/// Failure to read a vertex or a board layout from text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid vertex '{0}'")]
    InvalidVertex(String),

    #[error("invalid cell '{character}' at row {row}, column {col}")]
    InvalidCell { character: char, row: usize, col: usize },

    #[error("board rows must form a square: expected {expected} cells, got {got} in row {row}")]
    RaggedRows { expected: usize, got: usize, row: usize },

    #[error("board has {size} rows, at most {max} are supported")]
    TooLarge { size: usize, max: usize },
}

// Error kinds for rejected engine input

use thiserror::Error;

use crate::board::TILE_COUNT;

/// Raised when a flat board handed to the engine is malformed
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("invalid board size: expected {expected} tiles, got {actual}")]
    InvalidBoardSize { expected: usize, actual: usize },
    #[error("invalid tile value {value} at index {index}")]
    InvalidTileValue { index: usize, value: i64 },
}

impl BoardError {
    pub(crate) fn wrong_size(actual: usize) -> Self {
        BoardError::InvalidBoardSize {
            expected: TILE_COUNT,
            actual,
        }
    }
}

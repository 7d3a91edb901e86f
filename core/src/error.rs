use thiserror::Error;

/// Configuration-boundary errors. Engine operations themselves are total
/// and never fail; validation happens once, before a board exists.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("board dimensions must be positive")]
    InvalidSize,
    #[error("mine count must be less than the number of cells")]
    TooManyMines,
    #[error("mine coordinates outside the board")]
    InvalidCoords,
}

pub type Result<T> = core::result::Result<T, GameError>;

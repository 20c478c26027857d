use thiserror::Error;

/// Failures while building a board. Play operations never error: invalid or
/// untimely input is answered with a no-op outcome instead.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Coordinates outside the board")]
    OutOfBounds,
    #[error("Mine count must stay below the cell count")]
    TooManyMines,
}

pub type Result<T> = std::result::Result<T, GameError>;

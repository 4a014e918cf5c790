use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Move limit must be between 1 and 50")]
    InvalidMoveLimit,
    #[error("Board is too small for the configured shells")]
    BoardTooSmall,
    #[error("At least two shells are needed")]
    InvalidShellCount,
    #[error("Could not place shells without overlap")]
    PlacementUnsatisfiable,
    #[error("No round has been started")]
    NotStarted,
    #[error("Shells are still moving, no guess is accepted yet")]
    GuessNotAllowed,
    #[error("Invalid shell index")]
    InvalidShell,
}

pub type Result<T> = core::result::Result<T, GameError>;

use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board must have at least one row and one column")]
    EmptyBoard,
    #[error("Board has an odd number of cells, they cannot all be paired")]
    OddCellCount,
    #[error("Board needs more pairs than there are palette colors")]
    TooManyPairs,
    #[error("Every color must appear in exactly two cells")]
    UnpairedColor,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
}

pub type Result<T> = core::result::Result<T, GameError>;

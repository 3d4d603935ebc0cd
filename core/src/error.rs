use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Grid dimensions must be between 1 and 255")]
    InvalidSize,
    #[error("Mine probability must be within [0, 1]")]
    InvalidProbability,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Neighbor mine count does not match the mines around the cell")]
    InvalidNeighborCount,
    #[error("Mine count does not match the mine mask")]
    InvalidMineCount,
}

pub type Result<T> = core::result::Result<T, GridError>;

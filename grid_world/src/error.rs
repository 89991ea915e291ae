//! Errors raised by grid construction and mutation.

use thiserror::Error;

use crate::entities::ObjectId;
use crate::mechanics::Position;

/// Result alias for grid operations.
pub type GridResult<T> = Result<T, GridError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// The level handed to the core is unusable. Reported once, at load time.
    #[error("malformed level: {0}")]
    MalformedLevel(#[from] MalformedLevel),

    #[error("object {0} is not on the grid")]
    ObjectNotFound(ObjectId),

    #[error("position {0} is outside the grid")]
    OutOfBounds(Position),
}

/// Ways a level can fail validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedLevel {
    #[error("the level has no cells")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("object declared at {position} lies outside a {rows}x{cols} grid")]
    OutOfBounds {
        position: Position,
        rows: usize,
        cols: usize,
    },

    #[error("object declared at {declared} is stored in cell {cell}")]
    PositionMismatch { declared: Position, cell: Position },

    #[error("a {rows}x{cols} grid does not fit the coordinate range")]
    TooLarge { rows: usize, cols: usize },

    #[error("grid holds {found} cells, expected {expected}")]
    CellCount { expected: usize, found: usize },

    #[error("object {0} appears more than once")]
    DuplicateObject(ObjectId),
}

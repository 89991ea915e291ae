//! Level data handed over by a loading collaborator, and its validation.

use serde::{Deserialize, Serialize};

use super::Grid;
use crate::entities::{GameObject, ObjectKind};
use crate::error::{GridResult, MalformedLevel};
use crate::mechanics::{Direction, Position};

/// One object as described by level data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectSpec {
    pub kind: ObjectKind,
    /// Optional explicit position. When present it must name the cell the
    /// entry is stored in.
    #[serde(default)]
    pub position: Option<Position>,
    #[serde(default)]
    pub facing: Option<Direction>,
}

impl ObjectSpec {
    /// Describe an object with no declared position.
    pub fn new(kind: impl Into<ObjectKind>) -> Self {
        Self {
            kind: kind.into(),
            position: None,
            facing: None,
        }
    }

    /// Describe a text tile.
    pub fn text(word: impl Into<String>) -> Self {
        Self::new(ObjectKind::text(word))
    }

    /// Declare the position explicitly.
    pub fn at(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }
}

/// An already-deserialized level: rows of cells, each cell a bottom-to-top
/// stack of objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LevelData {
    pub cells: Vec<Vec<Vec<ObjectSpec>>>,
}

impl LevelData {
    pub fn new(cells: Vec<Vec<Vec<ObjectSpec>>>) -> Self {
        Self { cells }
    }

    /// Check the level is rectangular and every declared position agrees
    /// with its cell.
    pub fn validate(&self) -> Result<(usize, usize), MalformedLevel> {
        let rows = self.cells.len();
        let cols = self.cells.first().map(Vec::len).unwrap_or(0);
        if rows == 0 || cols == 0 {
            return Err(MalformedLevel::Empty);
        }
        if Position::from_indices(rows - 1, cols - 1).is_none() {
            return Err(MalformedLevel::TooLarge { rows, cols });
        }

        for (row, cells) in self.cells.iter().enumerate() {
            if cells.len() != cols {
                return Err(MalformedLevel::Ragged {
                    row,
                    expected: cols,
                    found: cells.len(),
                });
            }
            for (col, stack) in cells.iter().enumerate() {
                let cell = Position::from_indices(row, col)
                    .ok_or(MalformedLevel::TooLarge { rows, cols })?;
                for spec in stack {
                    let Some(declared) = spec.position else {
                        continue;
                    };
                    let in_bounds = declared.row >= 0
                        && declared.col >= 0
                        && (declared.row as usize) < rows
                        && (declared.col as usize) < cols;
                    if !in_bounds {
                        return Err(MalformedLevel::OutOfBounds {
                            position: declared,
                            rows,
                            cols,
                        });
                    }
                    if declared != cell {
                        return Err(MalformedLevel::PositionMismatch { declared, cell });
                    }
                }
            }
        }

        Ok((rows, cols))
    }
}

impl Grid {
    /// Build a grid from level data. Fails with `MalformedLevel` without
    /// attempting any repair.
    pub fn from_level(level: &LevelData) -> GridResult<Grid> {
        let (rows, cols) = level.validate()?;
        let mut grid = Grid::new(rows, cols);

        for (row, cells) in level.cells.iter().enumerate() {
            for (col, stack) in cells.iter().enumerate() {
                let position = Position::from_indices(row, col)
                    .ok_or(MalformedLevel::TooLarge { rows, cols })?;
                for spec in stack {
                    let object = GameObject::new(spec.kind.clone(), position)
                        .with_facing(spec.facing.unwrap_or_default());
                    grid.place(object)?;
                }
            }
        }

        Ok(grid)
    }
}

/// Build a grid from level data.
pub fn load_grid(level: &LevelData) -> GridResult<Grid> {
    Grid::from_level(level)
}

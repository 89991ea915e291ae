//! Read-only projection of the board for rendering collaborators.

use serde::{Deserialize, Serialize};

use super::Grid;
use crate::entities::{ObjectId, ObjectKind};
use crate::mechanics::Direction;

/// What a renderer needs to know about the object drawn in a cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewCell {
    pub id: ObjectId,
    pub kind: ObjectKind,
    pub facing: Direction,
    /// How many objects share the cell, including this one.
    pub stack_height: usize,
}

/// The top-most object of every cell, or `None` for blank cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderView {
    pub rows: Vec<Vec<Option<ViewCell>>>,
}

impl RenderView {
    /// Project a grid.
    pub fn of(grid: &Grid) -> Self {
        let mut rows: Vec<Vec<Option<ViewCell>>> = Vec::with_capacity(grid.rows());
        for pos in grid.positions() {
            if pos.col == 0 {
                rows.push(Vec::with_capacity(grid.cols()));
            }
            let stack = grid.objects_at(pos);
            let top = stack.last().map(|top| ViewCell {
                id: top.id,
                kind: top.kind.clone(),
                facing: top.facing,
                stack_height: stack.len(),
            });
            if let Some(row) = rows.last_mut() {
                row.push(top);
            }
        }
        Self { rows }
    }

    /// One line per row: each cell is its top object's label, or `.` when
    /// blank, separated by single spaces.
    pub fn to_text_lines(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        Some(view) => view.kind.label(),
                        None => ".".to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect()
    }
}

/// Project a grid for rendering.
pub fn renderable_view(grid: &Grid) -> RenderView {
    RenderView::of(grid)
}

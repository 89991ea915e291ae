//! The board: a rectangular array of cells, each holding an ordered stack
//! of objects.

mod level;
mod view;

pub use level::*;
pub use view::*;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::entities::{GameObject, ObjectId, ObjectKind};
use crate::error::{GridError, GridResult, MalformedLevel};
use crate::mechanics::{Direction, Position};

/// The contents of one position.
///
/// Order is insertion order. It decides which object is drawn on top and
/// nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Cell {
    objects: Vec<GameObject>,
}

impl Cell {
    pub fn objects(&self) -> &[GameObject] {
        &self.objects
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// The most recently inserted object, drawn above the others.
    pub fn top(&self) -> Option<&GameObject> {
        self.objects.last()
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.iter().any(|o| o.id == id)
    }

    /// Iterate over the text tiles in this cell.
    pub fn text_objects(&self) -> impl Iterator<Item = &GameObject> {
        self.objects.iter().filter(|o| o.is_text())
    }

    fn take(&mut self, id: ObjectId) -> Option<GameObject> {
        let index = self.objects.iter().position(|o| o.id == id)?;
        Some(self.objects.remove(index))
    }
}

/// The game board. Owns every object on it.
///
/// Every object lives in exactly one cell and its stored position always
/// names that cell; all mutation goes through methods that keep both sides
/// in step. A deserialized grid is validated before it is handed out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridData")]
pub struct Grid {
    rows: usize,
    cols: usize,
    /// Row-major.
    cells: Vec<Cell>,
}

/// Serialized form of a grid, checked by [`Grid::validate`] on the way in.
#[derive(Deserialize)]
struct GridData {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl TryFrom<GridData> for Grid {
    type Error = MalformedLevel;

    fn try_from(data: GridData) -> Result<Self, Self::Error> {
        let grid = Grid {
            rows: data.rows,
            cols: data.cols,
            cells: data.cells,
        };
        grid.validate()?;
        Ok(grid)
    }
}

impl Grid {
    /// Create an empty grid. Dimensions outside the coordinate range are
    /// reported by [`Grid::validate`].
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::default(); rows * cols],
        }
    }

    /// Check the board invariants: non-empty, addressable dimensions, one
    /// cell per position, every object stored in the cell its position
    /// names, and no object present twice.
    pub fn validate(&self) -> Result<(), MalformedLevel> {
        let (rows, cols) = (self.rows, self.cols);
        if rows == 0 || cols == 0 {
            return Err(MalformedLevel::Empty);
        }
        if Position::from_indices(rows - 1, cols - 1).is_none() {
            return Err(MalformedLevel::TooLarge { rows, cols });
        }
        let expected = rows
            .checked_mul(cols)
            .ok_or(MalformedLevel::TooLarge { rows, cols })?;
        if self.cells.len() != expected {
            return Err(MalformedLevel::CellCount {
                expected,
                found: self.cells.len(),
            });
        }

        let mut seen = HashSet::new();
        for (index, cell) in self.cells.iter().enumerate() {
            let position = self.position_of_index(index);
            for object in &cell.objects {
                if object.position != position {
                    return Err(MalformedLevel::PositionMismatch {
                        declared: object.position,
                        cell: position,
                    });
                }
                if !seen.insert(object.id) {
                    return Err(MalformedLevel::DuplicateObject(object.id));
                }
            }
        }

        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// True iff `0 <= row < rows` and `0 <= col < cols`.
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row >= 0
            && pos.col >= 0
            && (pos.row as usize) < self.rows
            && (pos.col as usize) < self.cols
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if self.in_bounds(pos) {
            Some(pos.row as usize * self.cols + pos.col as usize)
        } else {
            None
        }
    }

    fn position_of_index(&self, index: usize) -> Position {
        Position::new((index / self.cols) as i32, (index % self.cols) as i32)
    }

    /// Get the cell at a position.
    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        self.index(pos).and_then(|i| self.cells.get(i))
    }

    /// Objects at a position, in insertion order. Empty for an empty or
    /// out-of-bounds position.
    pub fn objects_at(&self, pos: Position) -> &[GameObject] {
        self.cell(pos).map(Cell::objects).unwrap_or(&[])
    }

    /// Every in-bounds position, row-major.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.cells.len()).map(|i| self.position_of_index(i))
    }

    /// Every object on the board, row-major then insertion order.
    pub fn all_objects(&self) -> impl Iterator<Item = &GameObject> {
        self.cells.iter().flat_map(|cell| cell.objects.iter())
    }

    /// Get the total number of objects.
    pub fn object_count(&self) -> usize {
        self.cells.iter().map(|cell| cell.objects.len()).sum()
    }

    /// Get an object by ID.
    pub fn get(&self, id: ObjectId) -> Option<&GameObject> {
        self.all_objects().find(|o| o.id == id)
    }

    /// Add an object to the top of the cell named by its position.
    pub fn place(&mut self, object: GameObject) -> GridResult<ObjectId> {
        let index = self
            .index(object.position)
            .ok_or(GridError::OutOfBounds(object.position))?;
        let id = object.id;
        self.cells[index].objects.push(object);
        Ok(id)
    }

    /// Relocate an object between cells, updating the cell lists and the
    /// object's stored position together.
    ///
    /// Nothing changes if `to` is out of bounds or the object is not in
    /// the cell at `from`.
    pub fn move_object(&mut self, id: ObjectId, from: Position, to: Position) -> GridResult<()> {
        let to_index = self.index(to).ok_or(GridError::OutOfBounds(to))?;
        let from_index = self.index(from).ok_or(GridError::OutOfBounds(from))?;
        let mut object = self.cells[from_index]
            .take(id)
            .ok_or(GridError::ObjectNotFound(id))?;
        object.position = to;
        self.cells[to_index].objects.push(object);
        Ok(())
    }

    /// Move an object one cell in a direction and turn it to face that way.
    pub fn step_object(&mut self, id: ObjectId, direction: Direction) -> GridResult<Position> {
        let from = self.get(id).ok_or(GridError::ObjectNotFound(id))?.position;
        let to = from + direction;
        self.move_object(id, from, to)?;
        if let Some(object) = self.object_mut(id, to) {
            object.facing = direction;
        }
        Ok(to)
    }

    /// Reclassify an object, keeping its identity, position and facing.
    ///
    /// Returns the previous kind.
    pub fn set_kind(&mut self, id: ObjectId, kind: ObjectKind) -> GridResult<ObjectKind> {
        let pos = self.get(id).ok_or(GridError::ObjectNotFound(id))?.position;
        let object = self
            .object_mut(id, pos)
            .ok_or(GridError::ObjectNotFound(id))?;
        Ok(std::mem::replace(&mut object.kind, kind))
    }

    /// Remove an object from the board.
    pub fn remove(&mut self, id: ObjectId) -> GridResult<GameObject> {
        let pos = self.get(id).ok_or(GridError::ObjectNotFound(id))?.position;
        let index = self.index(pos).ok_or(GridError::OutOfBounds(pos))?;
        self.cells[index]
            .take(id)
            .ok_or(GridError::ObjectNotFound(id))
    }

    fn object_mut(&mut self, id: ObjectId, pos: Position) -> Option<&mut GameObject> {
        let index = self.index(pos)?;
        self.cells[index].objects.iter_mut().find(|o| o.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mechanics::Noun;

    #[test]
    fn test_in_bounds_includes_origin() {
        let grid = Grid::new(2, 3);
        assert!(grid.in_bounds(Position::new(0, 0)));
        assert!(grid.in_bounds(Position::new(1, 2)));
        assert!(!grid.in_bounds(Position::new(2, 0)));
        assert!(!grid.in_bounds(Position::new(0, 3)));
        assert!(!grid.in_bounds(Position::new(-1, 0)));
        assert!(!grid.in_bounds(Position::new(0, -1)));
    }

    #[test]
    fn test_objects_at_out_of_bounds_is_empty() {
        let grid = Grid::new(1, 1);
        assert!(grid.objects_at(Position::new(5, 5)).is_empty());
        assert!(grid.objects_at(Position::new(0, 0)).is_empty());
    }

    #[test]
    fn test_place_and_query() {
        let mut grid = Grid::new(2, 2);
        let baba = GameObject::new(Noun::Baba, Position::new(1, 1));
        let id = grid.place(baba).unwrap();

        assert_eq!(grid.objects_at(Position::new(1, 1)).len(), 1);
        assert_eq!(grid.get(id).unwrap().position, Position::new(1, 1));
        assert_eq!(grid.object_count(), 1);
    }

    #[test]
    fn test_place_out_of_bounds() {
        let mut grid = Grid::new(2, 2);
        let rock = GameObject::new(Noun::Rock, Position::new(2, 0));
        assert_eq!(
            grid.place(rock),
            Err(GridError::OutOfBounds(Position::new(2, 0)))
        );
    }

    #[test]
    fn test_move_keeps_cell_and_position_in_sync() {
        let mut grid = Grid::new(1, 3);
        let id = grid
            .place(GameObject::new(Noun::Baba, Position::new(0, 0)))
            .unwrap();

        grid.move_object(id, Position::new(0, 0), Position::new(0, 2))
            .unwrap();

        assert!(grid.objects_at(Position::new(0, 0)).is_empty());
        assert!(grid.cell(Position::new(0, 2)).unwrap().contains(id));
        assert_eq!(grid.get(id).unwrap().position, Position::new(0, 2));
    }

    #[test]
    fn test_failed_move_leaves_grid_untouched() {
        let mut grid = Grid::new(1, 2);
        let id = grid
            .place(GameObject::new(Noun::Baba, Position::new(0, 1)))
            .unwrap();
        let before = grid.clone();

        assert!(grid
            .move_object(id, Position::new(0, 1), Position::new(0, 2))
            .is_err());
        assert!(grid
            .move_object(id, Position::new(0, 0), Position::new(0, 1))
            .is_err());
        assert_eq!(grid, before);
    }

    #[test]
    fn test_step_object_sets_facing() {
        let mut grid = Grid::new(2, 2);
        let id = grid
            .place(GameObject::new(Noun::Keke, Position::new(0, 0)))
            .unwrap();

        let to = grid.step_object(id, Direction::Down).unwrap();

        assert_eq!(to, Position::new(1, 0));
        assert_eq!(grid.get(id).unwrap().facing, Direction::Down);
    }

    #[test]
    fn test_set_kind_and_remove() {
        let mut grid = Grid::new(1, 1);
        let id = grid
            .place(GameObject::new(Noun::Rock, Position::new(0, 0)))
            .unwrap();

        let previous = grid.set_kind(id, ObjectKind::Noun(Noun::Flag)).unwrap();
        assert_eq!(previous, ObjectKind::Noun(Noun::Rock));
        assert_eq!(grid.get(id).unwrap().kind, ObjectKind::Noun(Noun::Flag));

        let removed = grid.remove(id).unwrap();
        assert_eq!(removed.id, id);
        assert_eq!(grid.object_count(), 0);
        assert_eq!(grid.remove(id), Err(GridError::ObjectNotFound(id)));
    }

    #[test]
    fn test_all_objects_row_major() {
        let mut grid = Grid::new(2, 2);
        let late = grid
            .place(GameObject::new(Noun::Wall, Position::new(1, 0)))
            .unwrap();
        let early = grid
            .place(GameObject::new(Noun::Wall, Position::new(0, 1)))
            .unwrap();

        let order: Vec<_> = grid.all_objects().map(|o| o.id).collect();
        assert_eq!(order, vec![early, late]);
    }

    #[test]
    fn test_deserialize_checks_cell_count() {
        let result = serde_json::from_str::<Grid>(r#"{"rows":2,"cols":2,"cells":[]}"#);
        assert!(result.is_err());

        let oversized =
            serde_json::from_str::<Grid>(r#"{"rows":1,"cols":4294967296,"cells":[]}"#);
        assert!(oversized.is_err());
    }

    #[test]
    fn test_deserialize_checks_stored_positions() {
        let mut grid = Grid::new(1, 2);
        grid.place(GameObject::new(Noun::Baba, Position::new(0, 0)))
            .unwrap();
        grid.place(GameObject::new(Noun::Baba, Position::new(0, 1)))
            .unwrap();
        let json = serde_json::to_string(&grid).unwrap();

        let restored: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, grid);

        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        value["cells"][1]["objects"][0]["position"]["col"] = 0.into();
        assert!(serde_json::from_value::<Grid>(value).is_err());
    }

    #[test]
    fn test_validate_rejects_duplicate_object() {
        let mut grid = Grid::new(1, 2);
        let baba = GameObject::new(Noun::Baba, Position::new(0, 0));
        grid.place(baba.clone()).unwrap();
        assert_eq!(grid.validate(), Ok(()));

        grid.place(baba.clone()).unwrap();
        assert_eq!(
            grid.validate(),
            Err(MalformedLevel::DuplicateObject(baba.id))
        );
    }

    #[test]
    fn test_validate_rejects_empty_grid() {
        assert_eq!(Grid::new(0, 3).validate(), Err(MalformedLevel::Empty));
    }
}

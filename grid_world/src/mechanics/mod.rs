//! Board geometry and the fixed set of nouns.

use serde::{Deserialize, Serialize};

/// A cell coordinate. Rows grow downward, columns grow rightward.
///
/// Coordinates are signed so that stepping off the board produces a
/// position that [`Grid::in_bounds`](crate::Grid::in_bounds) can reject
/// instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    /// Create a position from a row and a column.
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Build a position from grid indices. `None` when either index does
    /// not fit a coordinate.
    pub fn from_indices(row: usize, col: usize) -> Option<Self> {
        Some(Self::new(i32::try_from(row).ok()?, i32::try_from(col).ok()?))
    }

    /// Step one cell in a direction.
    pub fn step(self, direction: Direction) -> Self {
        let (d_row, d_col) = direction.delta();
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }

    /// Signed distance travelled along a direction, used to order moves.
    pub fn progress_along(self, direction: Direction) -> i32 {
        let (d_row, d_col) = direction.delta();
        self.row * d_row + self.col * d_col
    }
}

impl std::ops::Add<Direction> for Position {
    type Output = Position;

    fn add(self, direction: Direction) -> Position {
        self.step(direction)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The four input directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Direction {
    Up,
    Down,
    Left,
    #[default]
    Right,
}

pub const ALL_DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

impl Direction {
    /// Row/column offset of one step.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    pub fn reverse(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(name)
    }
}

/// Concrete object nouns. Each noun is both a board object kind and a word
/// that can appear on a text tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Noun {
    Baba,
    Keke,
    Wall,
    Rock,
    Flag,
    Door,
    Key,
    Water,
}

impl Noun {
    pub const ALL: [Noun; 8] = [
        Noun::Baba,
        Noun::Keke,
        Noun::Wall,
        Noun::Rock,
        Noun::Flag,
        Noun::Door,
        Noun::Key,
        Noun::Water,
    ];

    /// The word written on this noun's text tile.
    pub fn word(self) -> &'static str {
        match self {
            Noun::Baba => "BABA",
            Noun::Keke => "KEKE",
            Noun::Wall => "WALL",
            Noun::Rock => "ROCK",
            Noun::Flag => "FLAG",
            Noun::Door => "DOOR",
            Noun::Key => "KEY",
            Noun::Water => "WATER",
        }
    }

    /// Look up a noun by its exact upper-case word.
    pub fn from_word(word: &str) -> Option<Noun> {
        Noun::ALL.into_iter().find(|noun| noun.word() == word)
    }
}

impl std::fmt::Display for Noun {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.word())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_indices_rejects_oversized() {
        assert_eq!(Position::from_indices(2, 3), Some(Position::new(2, 3)));
        assert_eq!(Position::from_indices(i32::MAX as usize + 1, 0), None);
        assert_eq!(Position::from_indices(0, usize::MAX), None);
    }

    #[test]
    fn test_position_step() {
        let origin = Position::new(0, 0);
        assert_eq!(origin + Direction::Right, Position::new(0, 1));
        assert_eq!(origin + Direction::Down, Position::new(1, 0));
        assert_eq!(origin + Direction::Up, Position::new(-1, 0));
        assert_eq!(origin + Direction::Left, Position::new(0, -1));
    }

    #[test]
    fn test_direction_reverse() {
        for direction in ALL_DIRECTIONS {
            assert_eq!(direction.reverse().reverse(), direction);
            let forward = Position::new(3, 3) + direction;
            assert_eq!(forward + direction.reverse(), Position::new(3, 3));
        }
    }

    #[test]
    fn test_progress_along() {
        let near = Position::new(2, 1);
        let far = Position::new(2, 4);
        assert!(far.progress_along(Direction::Right) > near.progress_along(Direction::Right));
        assert!(far.progress_along(Direction::Left) < near.progress_along(Direction::Left));
    }

    #[test]
    fn test_noun_words() {
        for noun in Noun::ALL {
            assert_eq!(Noun::from_word(noun.word()), Some(noun));
        }
        assert_eq!(Noun::from_word("baba"), None);
        assert_eq!(Noun::from_word("IS"), None);
    }
}

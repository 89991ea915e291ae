//! Object definitions.

use serde::{Deserialize, Serialize};

use super::ObjectId;
use crate::mechanics::{Direction, Noun, Position};

/// What an object is: a concrete noun, or a text tile showing one word.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Noun(Noun),
    /// A text tile. The word is kept verbatim, so tiles outside the
    /// vocabulary can still sit on the board as decoration.
    Text(String),
}

impl ObjectKind {
    /// Create a text kind.
    pub fn text(word: impl Into<String>) -> Self {
        ObjectKind::Text(word.into())
    }

    pub fn is_text(&self) -> bool {
        matches!(self, ObjectKind::Text(_))
    }

    /// The noun, if this is a concrete object.
    pub fn noun(&self) -> Option<Noun> {
        match self {
            ObjectKind::Noun(noun) => Some(*noun),
            ObjectKind::Text(_) => None,
        }
    }

    /// The word on the tile, if this is text.
    pub fn word(&self) -> Option<&str> {
        match self {
            ObjectKind::Text(word) => Some(word.as_str()),
            ObjectKind::Noun(_) => None,
        }
    }

    /// Short label used by text renderings: the noun name in lower case
    /// for objects, the word itself for text.
    pub fn label(&self) -> String {
        match self {
            ObjectKind::Noun(noun) => noun.word().to_lowercase(),
            ObjectKind::Text(word) => word.clone(),
        }
    }
}

impl From<Noun> for ObjectKind {
    fn from(noun: Noun) -> Self {
        ObjectKind::Noun(noun)
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObjectKind::Noun(noun) => write!(f, "{}", noun),
            ObjectKind::Text(word) => write!(f, "text:{}", word),
        }
    }
}

/// An object placed on the grid.
///
/// Gameplay flags are not stored here; they are derived from the active
/// rules each tick and looked up by kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameObject {
    pub id: ObjectId,
    pub kind: ObjectKind,
    /// Kept in sync with the containing cell by [`Grid`](crate::Grid).
    pub position: Position,
    /// Last direction this object moved in.
    pub facing: Direction,
}

impl GameObject {
    /// Create a new object at a position.
    pub fn new(kind: impl Into<ObjectKind>, position: Position) -> Self {
        Self {
            id: ObjectId::new(),
            kind: kind.into(),
            position,
            facing: Direction::default(),
        }
    }

    /// Create a text tile at a position.
    pub fn text(word: impl Into<String>, position: Position) -> Self {
        Self::new(ObjectKind::text(word), position)
    }

    /// Set the facing direction.
    pub fn with_facing(mut self, facing: Direction) -> Self {
        self.facing = facing;
        self
    }

    pub fn is_text(&self) -> bool {
        self.kind.is_text()
    }
}

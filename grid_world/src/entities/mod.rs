//! Board objects and their identities.

mod object;

pub use object::*;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for every object on the board.
///
/// Identity survives moves and kind transformations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub Uuid);

impl ObjectId {
    /// Create a new random object ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an object ID from a specific UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

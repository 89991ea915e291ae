//! Outcome evaluation after a move.

use grid_world::Grid;
use serde::{Deserialize, Serialize};

use super::CapabilityTable;

/// Game state after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Outcome {
    #[default]
    Continue,
    Win,
    Loss,
}

impl Outcome {
    /// Win and Loss end the level.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::Continue)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Continue => f.write_str("continue"),
            Outcome::Win => f.write_str("win"),
            Outcome::Loss => f.write_str("loss"),
        }
    }
}

/// Check win and loss over the board.
///
/// A cell counts when it holds a controllable object and an object with the
/// flag, which may be the same object. Loss is checked first, so a tick
/// that both wins and loses is a loss.
pub fn evaluate_outcome(grid: &Grid, table: &CapabilityTable) -> Outcome {
    let mut won = false;

    for pos in grid.positions() {
        let occupants = grid.objects_at(pos);
        if !occupants.iter().any(|o| table.for_object(o).controllable) {
            continue;
        }
        if occupants.iter().any(|o| table.for_object(o).losing) {
            return Outcome::Loss;
        }
        if occupants.iter().any(|o| table.for_object(o).winning) {
            won = true;
        }
    }

    if won {
        Outcome::Win
    } else {
        Outcome::Continue
    }
}

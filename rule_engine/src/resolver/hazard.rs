//! Hazards: sinking and melting.
//!
//! Objects only interact with objects at the same float level in their
//! cell. A sinking object takes everything at its level down with it when
//! it shares the level with anything else. Melting objects at the level of
//! a hot object are destroyed.

use grid_world::{Grid, GridResult, ObjectId, ObjectKind, Position};
use serde::{Deserialize, Serialize};

use super::CapabilityTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HazardCause {
    Sink,
    Melt,
}

impl std::fmt::Display for HazardCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HazardCause::Sink => f.write_str("sank"),
            HazardCause::Melt => f.write_str("melted"),
        }
    }
}

/// An object removed by a hazard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destruction {
    pub object: ObjectId,
    pub kind: ObjectKind,
    pub position: Position,
    pub cause: HazardCause,
}

/// Find what the hazards destroy, without touching the grid.
pub fn plan_hazards(grid: &Grid, table: &CapabilityTable) -> Vec<Destruction> {
    let mut doomed = Vec::new();

    for pos in grid.positions() {
        let occupants = grid.objects_at(pos);
        if occupants.is_empty() {
            continue;
        }

        for floating in [false, true] {
            let level: Vec<_> = occupants
                .iter()
                .filter(|o| table.for_object(o).floating == floating)
                .collect();

            let sinks = level.iter().any(|o| table.for_object(o).sinking);
            let hot = level.iter().any(|o| table.for_object(o).hot);

            for object in &level {
                let cause = if sinks && level.len() > 1 {
                    HazardCause::Sink
                } else if hot && table.for_object(object).melting {
                    HazardCause::Melt
                } else {
                    continue;
                };
                doomed.push(Destruction {
                    object: object.id,
                    kind: object.kind.clone(),
                    position: pos,
                    cause,
                });
            }
        }
    }

    doomed
}

/// Remove everything the hazards destroy.
pub fn resolve_hazards(grid: &mut Grid, table: &CapabilityTable) -> GridResult<Vec<Destruction>> {
    let doomed = plan_hazards(grid, table);
    for destruction in &doomed {
        grid.remove(destruction.object)?;
    }
    Ok(doomed)
}

//! Movement resolver - input, pushes and push chains.
//!
//! Resolution has two phases. Planning reads a single snapshot of the grid
//! and capability table and decides, per controllable object, whether it
//! moves and what it pushes. Commit then applies every planned step. A
//! rejected object leaves the grid exactly as it was; it never blocks or
//! reverts another object's move.

use grid_world::{Direction, GameObject, Grid, GridResult, ObjectId, ObjectKind, Position};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::HashSet;

use super::CapabilityTable;

/// Why an object could not move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectReason {
    /// The object, or the end of its push chain, would leave the grid.
    OutOfBounds,
    /// A blocking object sits in the path.
    Blocked,
    /// The push chain is longer than the configured cap.
    RecursionLimitExceeded,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            RejectReason::OutOfBounds => "edge of the grid",
            RejectReason::Blocked => "blocked",
            RejectReason::RecursionLimitExceeded => "push chain too long",
        };
        f.write_str(text)
    }
}

/// How one controllable object's move ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttemptStatus {
    Committed,
    Rejected(RejectReason),
}

/// One controllable object's move this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveAttempt {
    pub object: ObjectId,
    pub from: Position,
    pub status: AttemptStatus,
}

/// An object that changed cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub object: ObjectId,
    pub kind: ObjectKind,
    pub from: Position,
    pub to: Position,
}

/// Result of planning: the attempts and the de-duplicated set of objects
/// that will move one cell.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MovePlan {
    pub direction: Option<Direction>,
    pub attempts: Vec<MoveAttempt>,
    movers: Vec<Mover>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Mover {
    id: ObjectId,
    kind: ObjectKind,
    from: Position,
    /// Index within the origin cell, to keep stacking order on arrival.
    layer: usize,
}

impl MovePlan {
    /// Number of objects that will change cells.
    pub fn mover_count(&self) -> usize {
        self.movers.len()
    }

    pub fn will_move(&self, id: ObjectId) -> bool {
        self.movers.iter().any(|m| m.id == id)
    }
}

/// Default push-chain cap: rows + cols, never shorter than the grid
/// diagonal.
pub fn default_push_depth(grid: &Grid) -> usize {
    grid.rows() + grid.cols()
}

/// Plans moves against one snapshot of the grid.
pub struct MovementResolver<'a> {
    grid: &'a Grid,
    table: &'a CapabilityTable,
    direction: Direction,
    max_depth: usize,
}

impl<'a> MovementResolver<'a> {
    pub fn new(grid: &'a Grid, table: &'a CapabilityTable, direction: Direction) -> Self {
        Self {
            grid,
            table,
            direction,
            max_depth: default_push_depth(grid),
        }
    }

    /// Override the push-chain cap.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Whether an object standing at `from` can step in the resolver's
    /// direction.
    pub fn can_move(&self, from: Position) -> Result<(), RejectReason> {
        self.push_chain(from).map(|_| ())
    }

    /// Walk the line ahead of `from` and collect every pushable object that
    /// has to move first, nearest first.
    ///
    /// Each cell on the line is entered only if it is in bounds and holds
    /// nothing blocking. If it holds pushable objects, all of them move
    /// together and the walk continues from that cell; otherwise the walk
    /// ends and the move is allowed. `depth` counts pushed cells and is
    /// capped.
    pub fn push_chain(&self, from: Position) -> Result<Vec<(&'a GameObject, usize)>, RejectReason> {
        let mut pushed = Vec::new();
        let mut cursor = from;

        for depth in 0.. {
            if depth > self.max_depth {
                return Err(RejectReason::RecursionLimitExceeded);
            }

            let next = cursor + self.direction;
            if !self.grid.in_bounds(next) {
                return Err(RejectReason::OutOfBounds);
            }

            let occupants = self.grid.objects_at(next);
            let mut any_pushable = false;
            for (layer, object) in occupants.iter().enumerate() {
                let caps = self.table.for_object(object);
                if caps.blocking {
                    return Err(RejectReason::Blocked);
                }
                if caps.pushable {
                    any_pushable = true;
                    pushed.push((object, layer));
                }
            }

            if !any_pushable {
                break;
            }
            cursor = next;
        }

        Ok(pushed)
    }

    /// Decide every controllable object's move. Reads only.
    pub fn plan(&self) -> MovePlan {
        let mut plan = MovePlan {
            direction: Some(self.direction),
            ..MovePlan::default()
        };
        let mut seen: HashSet<ObjectId> = HashSet::new();

        for pos in self.grid.positions() {
            for (layer, object) in self.grid.objects_at(pos).iter().enumerate() {
                if !self.table.for_object(object).controllable {
                    continue;
                }

                let status = match self.push_chain(pos) {
                    Ok(pushed) => {
                        let chain = pushed
                            .into_iter()
                            .rev()
                            .chain(std::iter::once((object, layer)));
                        for (mover, layer) in chain {
                            if seen.insert(mover.id) {
                                plan.movers.push(Mover {
                                    id: mover.id,
                                    kind: mover.kind.clone(),
                                    from: mover.position,
                                    layer,
                                });
                            }
                        }
                        AttemptStatus::Committed
                    }
                    Err(reason) => AttemptStatus::Rejected(reason),
                };

                plan.attempts.push(MoveAttempt {
                    object: object.id,
                    from: pos,
                    status,
                });
            }
        }

        plan
    }
}

/// Apply a plan. Objects farthest along the direction move first, and
/// objects leaving the same cell keep their relative order.
pub fn commit_plan(grid: &mut Grid, plan: &MovePlan) -> GridResult<Vec<Step>> {
    let Some(direction) = plan.direction else {
        return Ok(Vec::new());
    };

    let mut order: Vec<&Mover> = plan.movers.iter().collect();
    order.sort_by_key(|m| (Reverse(m.from.progress_along(direction)), m.from, m.layer));

    // Steps land on a copy; the grid is replaced only once all succeed.
    let mut staged = grid.clone();
    let mut steps = Vec::with_capacity(order.len());
    for mover in order {
        let to = staged.step_object(mover.id, direction)?;
        steps.push(Step {
            object: mover.id,
            kind: mover.kind.clone(),
            from: mover.from,
            to,
        });
    }
    *grid = staged;
    Ok(steps)
}

/// Outcome of resolving one input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MoveResolution {
    pub attempts: Vec<MoveAttempt>,
    pub steps: Vec<Step>,
}

/// Plan against the current grid, then commit.
pub fn resolve_move(
    grid: &mut Grid,
    table: &CapabilityTable,
    direction: Direction,
    max_depth: Option<usize>,
) -> GridResult<MoveResolution> {
    let plan = {
        let mut resolver = MovementResolver::new(grid, table, direction);
        if let Some(depth) = max_depth {
            resolver = resolver.with_max_depth(depth);
        }
        resolver.plan()
    };
    let steps = commit_plan(grid, &plan)?;
    Ok(MoveResolution {
        attempts: plan.attempts,
        steps,
    })
}

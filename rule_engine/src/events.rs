//! Tick events - a typed record of what happened during one tick.
//!
//! Events are the engine's log: they are collected into the tick report,
//! can be rendered as text for a console, or as JSON lines for tooling.

use grid_world::{Direction, Noun, ObjectId, ObjectKind, Position};
use serde::{Deserialize, Serialize};

use crate::resolver::{Destruction, HazardCause, Outcome, RejectReason, Step, Transformation};
use crate::rules::RejectedRun;

/// Something that happened during a tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TickEvent {
    /// A run of two or more words that did not parse.
    RuleRejected {
        origin: Position,
        direction: Direction,
        words: Vec<String>,
        reason: String,
    },
    Transformed {
        object: ObjectId,
        position: Position,
        from: Noun,
        to: Noun,
    },
    Moved {
        object: ObjectId,
        kind: ObjectKind,
        from: Position,
        to: Position,
    },
    MoveRejected {
        object: ObjectId,
        position: Position,
        reason: RejectReason,
    },
    Destroyed {
        object: ObjectId,
        kind: ObjectKind,
        position: Position,
        cause: HazardCause,
    },
    OutcomeReached {
        outcome: Outcome,
    },
}

impl TickEvent {
    /// Short machine-friendly name of the event.
    pub fn name(&self) -> &'static str {
        match self {
            TickEvent::RuleRejected { .. } => "rule_rejected",
            TickEvent::Transformed { .. } => "transformed",
            TickEvent::Moved { .. } => "moved",
            TickEvent::MoveRejected { .. } => "move_rejected",
            TickEvent::Destroyed { .. } => "destroyed",
            TickEvent::OutcomeReached { .. } => "outcome_reached",
        }
    }

    /// Render as a single JSON line.
    pub fn to_json_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl From<&RejectedRun> for TickEvent {
    fn from(rejected: &RejectedRun) -> Self {
        TickEvent::RuleRejected {
            origin: rejected.run.origin,
            direction: rejected.run.direction,
            words: rejected.run.words.clone(),
            reason: rejected.error.to_string(),
        }
    }
}

impl From<&Transformation> for TickEvent {
    fn from(change: &Transformation) -> Self {
        TickEvent::Transformed {
            object: change.object,
            position: change.position,
            from: change.from,
            to: change.to,
        }
    }
}

impl From<&Step> for TickEvent {
    fn from(step: &Step) -> Self {
        TickEvent::Moved {
            object: step.object,
            kind: step.kind.clone(),
            from: step.from,
            to: step.to,
        }
    }
}

impl From<&Destruction> for TickEvent {
    fn from(destruction: &Destruction) -> Self {
        TickEvent::Destroyed {
            object: destruction.object,
            kind: destruction.kind.clone(),
            position: destruction.position,
            cause: destruction.cause,
        }
    }
}

impl std::fmt::Display for TickEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TickEvent::RuleRejected {
                origin,
                direction,
                words,
                reason,
            } => write!(
                f,
                "ignored '{}' reading {} from {}: {}",
                words.join(" "),
                direction,
                origin,
                reason
            ),
            TickEvent::Transformed {
                position, from, to, ..
            } => write!(f, "{} at {} became {}", from, position, to),
            TickEvent::Moved { kind, from, to, .. } => {
                write!(f, "{} moved {} -> {}", kind, from, to)
            }
            TickEvent::MoveRejected {
                position, reason, ..
            } => write!(f, "object at {} did not move: {}", position, reason),
            TickEvent::Destroyed {
                kind,
                position,
                cause,
                ..
            } => write!(f, "{} at {} {}", kind, position, cause),
            TickEvent::OutcomeReached { outcome } => write!(f, "outcome: {}", outcome),
        }
    }
}

/// Collects events for one tick. A disabled log drops everything.
#[derive(Debug, Clone)]
pub struct EventLog {
    enabled: bool,
    events: Vec<TickEvent>,
}

impl Default for EventLog {
    /// Recording, matching the engine's default configuration.
    fn default() -> Self {
        Self::new(true)
    }
}

impl EventLog {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            events: Vec::new(),
        }
    }

    pub fn record(&mut self, event: impl Into<TickEvent>) {
        if self.enabled {
            self.events.push(event.into());
        }
    }

    pub fn extend<'a, T>(&mut self, items: impl IntoIterator<Item = &'a T>)
    where
        T: 'a,
        TickEvent: From<&'a T>,
    {
        if self.enabled {
            self.events.extend(items.into_iter().map(TickEvent::from));
        }
    }

    pub fn into_events(self) -> Vec<TickEvent> {
        self.events
    }
}

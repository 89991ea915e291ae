//! Resolver module - what the active rules let every object do.
//!
//! The capability table is built in one pass over the rule set and is the
//! only thing movement, hazards and the outcome check consult. It is built
//! once per tick and thrown away afterwards.

mod hazard;
mod movement;
mod outcome;
mod transform;

pub use hazard::*;
pub use movement::*;
pub use outcome::*;
pub use transform::*;

use grid_world::{GameObject, Grid, Noun, ObjectKind};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::rules::{Action, RuleSet};

/// Gameplay flags of one object kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Capabilities {
    /// Moves with player input (`YOU`).
    pub controllable: bool,
    pub pushable: bool,
    /// `STOP`.
    pub blocking: bool,
    pub winning: bool,
    /// `DEFEAT`.
    pub losing: bool,
    pub sinking: bool,
    pub hot: bool,
    pub melting: bool,
    pub floating: bool,
}

impl Capabilities {
    /// Baseline for text tiles: always pushable, nothing else.
    pub fn text_baseline() -> Self {
        Self {
            pushable: true,
            ..Self::default()
        }
    }

    /// Turn on the flag an action grants.
    pub fn grant(&mut self, action: Action) {
        match action {
            Action::You => self.controllable = true,
            Action::Push => self.pushable = true,
            Action::Stop => self.blocking = true,
            Action::Win => self.winning = true,
            Action::Defeat => self.losing = true,
            Action::Float => self.floating = true,
            Action::Melt => self.melting = true,
            Action::Hot => self.hot = true,
            Action::Sink => self.sinking = true,
        }
    }

    /// Check whether an action's flag is on.
    pub fn has(&self, action: Action) -> bool {
        match action {
            Action::You => self.controllable,
            Action::Push => self.pushable,
            Action::Stop => self.blocking,
            Action::Win => self.winning,
            Action::Defeat => self.losing,
            Action::Float => self.floating,
            Action::Melt => self.melting,
            Action::Hot => self.hot,
            Action::Sink => self.sinking,
        }
    }

    /// Check if no flag is set.
    pub fn is_inert(&self) -> bool {
        Action::ALL.iter().all(|action| !self.has(*action))
    }
}

/// Resolved flags for every noun on the board.
///
/// Flags are a union over rules; there is no precedence and no negation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CapabilityTable {
    by_noun: HashMap<Noun, Capabilities>,
}

impl CapabilityTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the table from the active rules and the nouns present on the
    /// board. Present nouns always get an entry, even if no rule names them.
    pub fn build(rules: &RuleSet, grid: &Grid) -> Self {
        let mut table = Self::new();

        for noun in grid.all_objects().filter_map(|o| o.kind.noun()) {
            table.by_noun.entry(noun).or_default();
        }

        for rule in rules {
            let Some(action) = rule.granted_action() else {
                continue;
            };
            for subject in &rule.subjects {
                table.by_noun.entry(*subject).or_default().grant(action);
            }
        }

        table
    }

    /// Flags of a noun; all false when the noun has no entry.
    pub fn get(&self, noun: Noun) -> Capabilities {
        self.by_noun.get(&noun).copied().unwrap_or_default()
    }

    /// Flags of an object kind, with the text baseline applied.
    pub fn for_kind(&self, kind: &ObjectKind) -> Capabilities {
        match kind {
            ObjectKind::Noun(noun) => self.get(*noun),
            ObjectKind::Text(_) => Capabilities::text_baseline(),
        }
    }

    pub fn for_object(&self, object: &GameObject) -> Capabilities {
        self.for_kind(&object.kind)
    }

    /// Nouns with at least one entry in the table.
    pub fn nouns(&self) -> impl Iterator<Item = Noun> + '_ {
        self.by_noun.keys().copied()
    }

    /// Nouns whose flags carry `action`, sorted.
    pub fn nouns_with(&self, action: Action) -> Vec<Noun> {
        let mut nouns: Vec<_> = self
            .by_noun
            .iter()
            .filter(|(_, caps)| caps.has(action))
            .map(|(noun, _)| *noun)
            .collect();
        nouns.sort();
        nouns
    }
}

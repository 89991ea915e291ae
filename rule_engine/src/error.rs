//! Error types for rule parsing and the engine.

use grid_world::GridError;
use thiserror::Error;

use crate::rules::{Action, Verb};

/// The grammar position the parser was trying to fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    Object,
    Verb,
    /// An object or, after `IS`, an action.
    Predicate,
}

impl std::fmt::Display for Expected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Expected::Object => "object",
            Expected::Verb => "verb",
            Expected::Predicate => "object or action",
        };
        f.write_str(name)
    }
}

/// Why a run of text did not form a rule. Recovered by the scanner; never
/// escapes a tick.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty text run")]
    EmptyRun,

    #[error("unknown word '{word}' at position {index}")]
    UnknownWord { word: String, index: usize },

    #[error("expected {expected} at position {index}, found {category} '{found}'")]
    UnexpectedToken {
        expected: Expected,
        found: String,
        category: &'static str,
        index: usize,
    },

    #[error("expected {expected} but the run ended")]
    UnexpectedEnd { expected: Expected },

    #[error("{count} word(s) left over after a complete rule, starting at position {index}")]
    TrailingTokens { count: usize, index: usize },

    #[error("action {action} can only follow IS, not {verb}")]
    ActionRequiresIs { verb: Verb, action: Action },
}

/// Errors surfaced to the engine's caller.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("invalid engine configuration: {0}")]
    Config(#[from] toml::de::Error),
}

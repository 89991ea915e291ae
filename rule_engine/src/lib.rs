//! # Rule Engine
//!
//! The core of the word puzzle: rules are not fixed, they are read off the
//! board every tick. This crate scans `grid_world` boards for runs of text
//! tiles, parses them into rules, derives what every kind of object can do,
//! and resolves player input into pushes, transformations and outcomes.
//!
//! ## Core Components
//!
//! - **rules**: Tokenizer, recursive-descent parser and board scanner
//! - **resolver**: Capability table, transformations, movement, hazards and outcome
//! - **events**: Typed record of what happened during a tick
//! - **engine**: The tick pipeline and its configuration
//!
//! ## Tick Pipeline
//!
//! Grid → scan → parse → transform → capabilities → move → hazards →
//! rescan → outcome. Nothing about the rule set survives between ticks
//! except what is written on the board.

pub mod engine;
pub mod error;
pub mod events;
pub mod resolver;
pub mod rules;

pub use engine::*;
pub use error::*;
pub use events::*;
pub use resolver::*;
pub use rules::*;

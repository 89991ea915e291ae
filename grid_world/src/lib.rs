//! # Grid World
//!
//! The board-state crate: positions, directions, nouns, objects and the grid
//! that owns them. This crate holds data and positional queries only; which
//! objects move, push or win is decided by `rule_engine`.

pub mod entities;
pub mod error;
pub mod grid;
pub mod mechanics;

pub use entities::*;
pub use error::*;
pub use grid::*;
pub use mechanics::*;

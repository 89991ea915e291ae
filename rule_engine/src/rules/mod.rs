//! Rules module - turning runs of text tiles into rules.
//!
//! The pipeline has three stages:
//! - **Tokenizer**: classifies each word against the fixed vocabulary
//! - **Parser**: recursive descent over tokens into a [`Rule`]
//! - **Scanner**: finds every run of text on the board and collects the
//!   rules that parse

mod parser;
mod rule;
mod scanner;
mod token;

pub use parser::*;
pub use rule::*;
pub use scanner::*;
pub use token::*;

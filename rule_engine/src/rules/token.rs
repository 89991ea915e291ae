//! Token definitions - the fixed vocabulary of rule words.

use grid_world::Noun;
use serde::{Deserialize, Serialize};

/// Words that join a subject to a predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verb {
    Is,
    Has,
    Make,
}

impl Verb {
    pub const ALL: [Verb; 3] = [Verb::Is, Verb::Has, Verb::Make];

    pub fn word(self) -> &'static str {
        match self {
            Verb::Is => "IS",
            Verb::Has => "HAS",
            Verb::Make => "MAKE",
        }
    }

    pub fn from_word(word: &str) -> Option<Verb> {
        Verb::ALL.into_iter().find(|verb| verb.word() == word)
    }
}

impl std::fmt::Display for Verb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.word())
    }
}

/// Intrinsic properties an `IS` rule can grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    You,
    Push,
    Stop,
    Win,
    Defeat,
    Float,
    Melt,
    Hot,
    Sink,
}

impl Action {
    pub const ALL: [Action; 9] = [
        Action::You,
        Action::Push,
        Action::Stop,
        Action::Win,
        Action::Defeat,
        Action::Float,
        Action::Melt,
        Action::Hot,
        Action::Sink,
    ];

    pub fn word(self) -> &'static str {
        match self {
            Action::You => "YOU",
            Action::Push => "PUSH",
            Action::Stop => "STOP",
            Action::Win => "WIN",
            Action::Defeat => "DEFEAT",
            Action::Float => "FLOAT",
            Action::Melt => "MELT",
            Action::Hot => "HOT",
            Action::Sink => "SINK",
        }
    }

    pub fn from_word(word: &str) -> Option<Action> {
        Action::ALL.into_iter().find(|action| action.word() == word)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.word())
    }
}

/// The only connective.
pub const AND: &str = "AND";

/// Semantic class of a token, carrying the decoded word where there is one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenClass {
    Object(Noun),
    Verb(Verb),
    Action(Action),
    Connective,
    /// Not in the vocabulary. Matches no grammar production.
    Unknown,
}

impl TokenClass {
    /// Classify a word by exact, case-sensitive lookup.
    pub fn of(word: &str) -> Self {
        if let Some(noun) = Noun::from_word(word) {
            TokenClass::Object(noun)
        } else if let Some(verb) = Verb::from_word(word) {
            TokenClass::Verb(verb)
        } else if let Some(action) = Action::from_word(word) {
            TokenClass::Action(action)
        } else if word == AND {
            TokenClass::Connective
        } else {
            TokenClass::Unknown
        }
    }

    /// Get the category of this token.
    pub fn category(&self) -> &'static str {
        match self {
            TokenClass::Object(_) => "object",
            TokenClass::Verb(_) => "verb",
            TokenClass::Action(_) => "action",
            TokenClass::Connective => "connective",
            TokenClass::Unknown => "unknown",
        }
    }
}

/// A classified word.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub class: TokenClass,
}

impl Token {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let class = TokenClass::of(&text);
        Self { text, class }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Classify a run of words. The output has one token per word.
pub fn tokenize<I, S>(words: I) -> Vec<Token>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    words.into_iter().map(|w| Token::new(w.as_ref())).collect()
}

//! Recursive-descent parser for the rule grammar.
//!
//! ```text
//! rule            := complex_object verb predicate
//! complex_object  := object (AND object)*
//! verb            := IS | HAS | MAKE
//! predicate       := object | action        (action only after IS)
//! ```
//!
//! The grammar is LL(1): every decision is made on the next token alone,
//! and a run must parse completely. A grammatical prefix followed by extra
//! words is rejected.

use grid_world::Noun;

use super::{Predicate, Rule, Token, TokenClass, Verb};
use crate::error::{Expected, ParseError};

/// Single-use parser over one run of tokens.
pub struct RuleParser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> RuleParser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Parse the whole run into one rule. All-or-nothing.
    pub fn parse(mut self) -> Result<Rule, ParseError> {
        if self.tokens.is_empty() {
            return Err(ParseError::EmptyRun);
        }

        let rule = self.rule()?;

        if self.pos < self.tokens.len() {
            return Err(ParseError::TrailingTokens {
                count: self.tokens.len() - self.pos,
                index: self.pos,
            });
        }
        Ok(rule)
    }

    fn rule(&mut self) -> Result<Rule, ParseError> {
        let subjects = self.complex_object()?;
        let verb = self.verb()?;
        let predicate = self.predicate(verb)?;
        Rule::new(subjects, verb, predicate)
    }

    fn complex_object(&mut self) -> Result<Vec<Noun>, ParseError> {
        let mut subjects = vec![self.object()?];
        while matches!(self.peek().map(|t| t.class), Some(TokenClass::Connective)) {
            self.pos += 1;
            subjects.push(self.object()?);
        }
        Ok(subjects)
    }

    fn object(&mut self) -> Result<Noun, ParseError> {
        let token = self.next(Expected::Object)?;
        match token.class {
            TokenClass::Object(noun) => Ok(noun),
            _ => Err(self.mismatch(Expected::Object, token)),
        }
    }

    fn verb(&mut self) -> Result<Verb, ParseError> {
        let token = self.next(Expected::Verb)?;
        match token.class {
            TokenClass::Verb(verb) => Ok(verb),
            _ => Err(self.mismatch(Expected::Verb, token)),
        }
    }

    fn predicate(&mut self, verb: Verb) -> Result<Predicate, ParseError> {
        let token = self.next(Expected::Predicate)?;
        match token.class {
            TokenClass::Object(noun) => Ok(Predicate::Object(noun)),
            TokenClass::Action(action) if verb == Verb::Is => Ok(Predicate::Action(action)),
            TokenClass::Action(action) => Err(ParseError::ActionRequiresIs { verb, action }),
            _ => Err(self.mismatch(Expected::Predicate, token)),
        }
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    /// Consume the next token, failing if the run is exhausted.
    fn next(&mut self, expected: Expected) -> Result<&'a Token, ParseError> {
        let token = self
            .peek()
            .ok_or(ParseError::UnexpectedEnd { expected })?;
        self.pos += 1;
        Ok(token)
    }

    /// Error for a token that was just consumed at the wrong place.
    fn mismatch(&self, expected: Expected, token: &Token) -> ParseError {
        let index = self.pos - 1;
        if token.class == TokenClass::Unknown {
            ParseError::UnknownWord {
                word: token.text.clone(),
                index,
            }
        } else {
            ParseError::UnexpectedToken {
                expected,
                found: token.text.clone(),
                category: token.class.category(),
                index,
            }
        }
    }
}

/// Parse a run of tokens into a rule.
pub fn parse(tokens: &[Token]) -> Result<Rule, ParseError> {
    RuleParser::new(tokens).parse()
}

/// Tokenize and parse a run of words.
pub fn parse_words<I, S>(words: I) -> Result<Rule, ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parse(&super::tokenize(words))
}

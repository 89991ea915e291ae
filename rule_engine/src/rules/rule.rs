//! Rule definitions - the parsed form of a run of text.

use grid_world::Noun;
use serde::{Deserialize, Serialize};

use super::{Action, Verb};
use crate::error::ParseError;

/// What a rule says about its subjects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Predicate {
    Object(Noun),
    Action(Action),
}

impl std::fmt::Display for Predicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Predicate::Object(noun) => write!(f, "{}", noun),
            Predicate::Action(action) => write!(f, "{}", action),
        }
    }
}

/// A rule such as `BABA AND KEKE IS YOU`.
///
/// An action predicate always comes with `IS`; [`Rule::new`] refuses
/// anything else.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rule {
    pub subjects: Vec<Noun>,
    pub verb: Verb,
    pub predicate: Predicate,
}

impl Rule {
    /// Build a rule, checking the verb/predicate pairing.
    pub fn new(subjects: Vec<Noun>, verb: Verb, predicate: Predicate) -> Result<Self, ParseError> {
        if let Predicate::Action(action) = predicate {
            if verb != Verb::Is {
                return Err(ParseError::ActionRequiresIs { verb, action });
            }
        }
        Ok(Self {
            subjects,
            verb,
            predicate,
        })
    }

    /// Check if this rule names a noun among its subjects.
    pub fn applies_to(&self, noun: Noun) -> bool {
        self.subjects.contains(&noun)
    }

    /// The action granted, if this is an `IS <action>` rule.
    pub fn granted_action(&self) -> Option<Action> {
        match (self.verb, self.predicate) {
            (Verb::Is, Predicate::Action(action)) => Some(action),
            _ => None,
        }
    }

    /// The target noun, if this is an `IS <object>` transformation rule.
    pub fn transform_target(&self) -> Option<Noun> {
        match (self.verb, self.predicate) {
            (Verb::Is, Predicate::Object(noun)) => Some(noun),
            _ => None,
        }
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let subjects: Vec<_> = self.subjects.iter().map(|n| n.word()).collect();
        write!(f, "{} {} {}", subjects.join(" AND "), self.verb, self.predicate)
    }
}

/// The rules readable from the board this tick. Duplicates are kept; they
/// have no additional effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn contains(&self, rule: &Rule) -> bool {
        self.rules.contains(rule)
    }

    /// Check whether some rule grants `action` to `noun`.
    pub fn grants(&self, noun: Noun, action: Action) -> bool {
        self.rules
            .iter()
            .any(|r| r.granted_action() == Some(action) && r.applies_to(noun))
    }

    /// Every `(subject, target)` transformation pair, in rule order.
    pub fn transformations(&self) -> impl Iterator<Item = (Noun, Noun)> + '_ {
        self.rules.iter().flat_map(|rule| {
            rule.transform_target()
                .into_iter()
                .flat_map(move |target| rule.subjects.iter().map(move |s| (*s, target)))
        })
    }
}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<T: IntoIterator<Item = Rule>>(iter: T) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_requires_is() {
        let rule = Rule::new(vec![Noun::Baba], Verb::Has, Predicate::Action(Action::You));
        assert_eq!(
            rule,
            Err(ParseError::ActionRequiresIs {
                verb: Verb::Has,
                action: Action::You
            })
        );
        assert!(Rule::new(vec![Noun::Baba], Verb::Has, Predicate::Object(Noun::Key)).is_ok());
    }

    #[test]
    fn test_rule_display() {
        let rule = Rule::new(
            vec![Noun::Baba, Noun::Flag],
            Verb::Is,
            Predicate::Action(Action::Win),
        )
        .unwrap();
        assert_eq!(rule.to_string(), "BABA AND FLAG IS WIN");
    }

    #[test]
    fn test_rule_accessors() {
        let you = Rule::new(vec![Noun::Baba], Verb::Is, Predicate::Action(Action::You)).unwrap();
        assert_eq!(you.granted_action(), Some(Action::You));
        assert_eq!(you.transform_target(), None);

        let make = Rule::new(vec![Noun::Keke], Verb::Make, Predicate::Object(Noun::Rock)).unwrap();
        assert_eq!(make.granted_action(), None);
        assert_eq!(make.transform_target(), None);
    }

    #[test]
    fn test_rule_set_queries() {
        let rules: RuleSet = [
            Rule::new(vec![Noun::Rock], Verb::Is, Predicate::Action(Action::Push)).unwrap(),
            Rule::new(vec![Noun::Wall, Noun::Water], Verb::Is, Predicate::Object(Noun::Flag))
                .unwrap(),
        ]
        .into_iter()
        .collect();

        assert!(rules.grants(Noun::Rock, Action::Push));
        assert!(!rules.grants(Noun::Wall, Action::Push));
        let pairs: Vec<_> = rules.transformations().collect();
        assert_eq!(pairs, vec![(Noun::Wall, Noun::Flag), (Noun::Water, Noun::Flag)]);
    }
}

//! Kind transformations from `X IS Y` rules.

use grid_world::{Grid, GridResult, Noun, ObjectId, ObjectKind, Position};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::rules::RuleSet;

/// One object changing noun.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transformation {
    pub object: ObjectId,
    pub position: Position,
    pub from: Noun,
    pub to: Noun,
}

/// Work out the noun each subject becomes this tick.
///
/// `X IS X` pins X against every transformation. When several rules
/// transform the same noun, the first one scanned wins.
pub fn transformation_targets(rules: &RuleSet) -> HashMap<Noun, Noun> {
    let pinned: HashSet<Noun> = rules
        .transformations()
        .filter(|(subject, target)| subject == target)
        .map(|(subject, _)| subject)
        .collect();

    let mut targets = HashMap::new();
    for (subject, target) in rules.transformations() {
        if subject == target || pinned.contains(&subject) {
            continue;
        }
        targets.entry(subject).or_insert(target);
    }
    targets
}

/// List the transformations the rules call for, against the board as it is.
/// Only noun objects are affected; text tiles keep their word.
pub fn plan_transformations(rules: &RuleSet, grid: &Grid) -> Vec<Transformation> {
    let targets = transformation_targets(rules);
    if targets.is_empty() {
        return Vec::new();
    }

    grid.all_objects()
        .filter_map(|object| {
            let from = object.kind.noun()?;
            let to = *targets.get(&from)?;
            Some(Transformation {
                object: object.id,
                position: object.position,
                from,
                to,
            })
        })
        .collect()
}

/// Reclassify objects in one pass. A kind produced here is not looked up
/// again, so chains like `ROCK IS FLAG` + `FLAG IS KEY` advance one step per
/// tick.
pub fn apply_transformations(grid: &mut Grid, rules: &RuleSet) -> GridResult<Vec<Transformation>> {
    let planned = plan_transformations(rules, grid);
    for change in &planned {
        grid.set_kind(change.object, ObjectKind::Noun(change.to))?;
    }
    Ok(planned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::parse_words;
    use grid_world::GameObject;

    fn rules(runs: &[&[&str]]) -> RuleSet {
        runs.iter().map(|words| parse_words(*words).unwrap()).collect()
    }

    #[test]
    fn test_transform_keeps_identity_and_position() {
        let mut grid = Grid::new(1, 2);
        let id = grid
            .place(GameObject::new(Noun::Rock, Position::new(0, 1)))
            .unwrap();

        let changes = apply_transformations(&mut grid, &rules(&[&["ROCK", "IS", "FLAG"]])).unwrap();

        assert_eq!(changes.len(), 1);
        let object = grid.get(id).unwrap();
        assert_eq!(object.kind, ObjectKind::Noun(Noun::Flag));
        assert_eq!(object.position, Position::new(0, 1));
    }

    #[test]
    fn test_no_chaining_within_a_tick() {
        let mut grid = Grid::new(1, 1);
        let id = grid
            .place(GameObject::new(Noun::Rock, Position::new(0, 0)))
            .unwrap();
        let chain = rules(&[&["ROCK", "IS", "FLAG"], &["FLAG", "IS", "KEY"]]);

        apply_transformations(&mut grid, &chain).unwrap();
        assert_eq!(grid.get(id).unwrap().kind, ObjectKind::Noun(Noun::Flag));

        apply_transformations(&mut grid, &chain).unwrap();
        assert_eq!(grid.get(id).unwrap().kind, ObjectKind::Noun(Noun::Key));
    }

    #[test]
    fn test_swap_happens_once() {
        let mut grid = Grid::new(1, 2);
        let rock = grid
            .place(GameObject::new(Noun::Rock, Position::new(0, 0)))
            .unwrap();
        let wall = grid
            .place(GameObject::new(Noun::Wall, Position::new(0, 1)))
            .unwrap();

        apply_transformations(&mut grid, &rules(&[&["ROCK", "IS", "WALL"], &["WALL", "IS", "ROCK"]]))
            .unwrap();

        assert_eq!(grid.get(rock).unwrap().kind, ObjectKind::Noun(Noun::Wall));
        assert_eq!(grid.get(wall).unwrap().kind, ObjectKind::Noun(Noun::Rock));
    }

    #[test]
    fn test_self_rule_pins_noun() {
        let targets = transformation_targets(&rules(&[&["BABA", "IS", "ROCK"], &["BABA", "IS", "BABA"]]));
        assert!(targets.is_empty());
    }

    #[test]
    fn test_first_rule_wins() {
        let targets = transformation_targets(&rules(&[&["KEKE", "IS", "DOOR"], &["KEKE", "IS", "KEY"]]));
        assert_eq!(targets.get(&Noun::Keke), Some(&Noun::Door));
    }

    #[test]
    fn test_text_tiles_are_not_transformed() {
        let mut grid = Grid::new(1, 1);
        let id = grid.place(GameObject::text("ROCK", Position::new(0, 0))).unwrap();

        let changes = apply_transformations(&mut grid, &rules(&[&["ROCK", "IS", "FLAG"]])).unwrap();

        assert!(changes.is_empty());
        assert_eq!(grid.get(id).unwrap().kind, ObjectKind::text("ROCK"));
    }
}

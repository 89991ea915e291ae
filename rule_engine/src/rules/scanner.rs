//! Board scanner - finds runs of text tiles and parses them.

use grid_world::{Direction, Grid, Position};
use serde::{Deserialize, Serialize};

use super::{parse_words, RuleSet};
use crate::error::ParseError;

/// Scans go right and down only; every run is found from its first cell.
pub const SCAN_DIRECTIONS: [Direction; 2] = [Direction::Right, Direction::Down];

/// Words read along one direction, starting at one text tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRun {
    pub origin: Position,
    pub direction: Direction,
    pub words: Vec<String>,
}

/// A run that did not parse, kept for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRun {
    pub run: TextRun,
    pub error: ParseError,
}

/// Everything one scan of the board produced.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScanResult {
    pub rules: RuleSet,
    pub rejected: Vec<RejectedRun>,
}

/// Collect every run of text on the board.
///
/// Each text object starts its own scans, so two tiles stacked in one cell
/// give two independent runs. Past the first cell a run reads one word per
/// cell, from the top text tile there, so a board yields at most two runs
/// per text object. A run ends at the first cell without text or at the
/// edge of the board.
pub fn find_runs(grid: &Grid) -> Vec<TextRun> {
    let mut runs = Vec::new();

    for origin in grid.positions() {
        for tile in grid.objects_at(origin) {
            let Some(word) = tile.kind.word() else {
                continue;
            };
            for direction in SCAN_DIRECTIONS {
                let mut words = vec![word.to_string()];
                let mut pos = origin + direction;
                while let Some(next) = top_word(grid, pos) {
                    words.push(next.to_string());
                    pos = pos + direction;
                }
                runs.push(TextRun {
                    origin,
                    direction,
                    words,
                });
            }
        }
    }

    runs
}

/// The word on the most recently placed text tile at `pos`.
fn top_word(grid: &Grid, pos: Position) -> Option<&str> {
    grid.objects_at(pos)
        .iter()
        .rev()
        .find_map(|o| o.kind.word())
}

/// Scan the board and parse every run. Runs of one word cannot form a rule
/// and are dropped without being reported; other failures are recorded in
/// `rejected` and never stop the scan.
pub fn scan_rules(grid: &Grid) -> ScanResult {
    let mut result = ScanResult::default();

    for run in find_runs(grid) {
        if run.words.len() < 2 {
            continue;
        }
        match parse_words(&run.words) {
            Ok(rule) => result.rules.push(rule),
            Err(error) => result.rejected.push(RejectedRun { run, error }),
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{Action, Predicate, Rule, Verb};
    use grid_world::{GameObject, Noun};

    fn place_words(grid: &mut Grid, start: Position, direction: Direction, words: &[&str]) {
        let mut pos = start;
        for word in words {
            grid.place(GameObject::text(*word, pos)).unwrap();
            pos = pos + direction;
        }
    }

    fn rule(subjects: &[Noun], action: Action) -> Rule {
        Rule::new(subjects.to_vec(), Verb::Is, Predicate::Action(action)).unwrap()
    }

    #[test]
    fn test_no_text_no_rules() {
        let mut grid = Grid::new(3, 3);
        grid.place(GameObject::new(Noun::Baba, Position::new(0, 0)))
            .unwrap();
        grid.place(GameObject::new(Noun::Wall, Position::new(1, 1)))
            .unwrap();

        let scan = scan_rules(&grid);

        assert!(scan.rules.is_empty());
        assert!(scan.rejected.is_empty());
    }

    #[test]
    fn test_horizontal_and_vertical_rules() {
        let mut grid = Grid::new(4, 4);
        place_words(&mut grid, Position::new(0, 0), Direction::Right, &["BABA", "IS", "YOU"]);
        place_words(&mut grid, Position::new(1, 3), Direction::Down, &["FLAG", "IS", "WIN"]);

        let scan = scan_rules(&grid);

        assert!(scan.rules.contains(&rule(&[Noun::Baba], Action::You)));
        assert!(scan.rules.contains(&rule(&[Noun::Flag], Action::Win)));
        assert_eq!(scan.rules.len(), 2);
    }

    #[test]
    fn test_run_starting_in_first_row_and_column() {
        let mut grid = Grid::new(3, 1);
        place_words(&mut grid, Position::new(0, 0), Direction::Down, &["ROCK", "IS", "PUSH"]);

        let scan = scan_rules(&grid);

        assert_eq!(scan.rules.len(), 1);
        assert!(scan.rules.grants(Noun::Rock, Action::Push));
    }

    #[test]
    fn test_trailing_word_spoils_run() {
        let mut grid = Grid::new(1, 4);
        place_words(&mut grid, Position::new(0, 0), Direction::Right, &["WALL", "IS", "PUSH", "ROCK"]);

        let scan = scan_rules(&grid);

        assert!(scan.rules.is_empty());
        assert!(scan
            .rejected
            .iter()
            .any(|r| r.error == ParseError::TrailingTokens { count: 1, index: 3 }));
    }

    #[test]
    fn test_suffix_runs_are_scanned() {
        let mut grid = Grid::new(1, 5);
        place_words(
            &mut grid,
            Position::new(0, 0),
            Direction::Right,
            &["BABA", "AND", "ROCK", "IS", "PUSH"],
        );

        let scan = scan_rules(&grid);

        assert!(scan.rules.contains(&rule(&[Noun::Baba, Noun::Rock], Action::Push)));
        assert!(scan.rules.contains(&rule(&[Noun::Rock], Action::Push)));
    }

    #[test]
    fn test_stacked_origin_starts_separate_runs() {
        let mut grid = Grid::new(1, 3);
        place_words(&mut grid, Position::new(0, 0), Direction::Right, &["KEKE", "IS", "YOU"]);
        grid.place(GameObject::text("BABA", Position::new(0, 0)))
            .unwrap();

        let scan = scan_rules(&grid);

        assert!(scan.rules.contains(&rule(&[Noun::Keke], Action::You)));
        assert!(scan.rules.contains(&rule(&[Noun::Baba], Action::You)));
    }

    #[test]
    fn test_later_stacked_cell_reads_top_tile() {
        let mut grid = Grid::new(1, 3);
        place_words(&mut grid, Position::new(0, 0), Direction::Right, &["KEKE", "IS", "YOU"]);
        grid.place(GameObject::text("WIN", Position::new(0, 2)))
            .unwrap();

        let scan = scan_rules(&grid);

        assert!(scan.rules.contains(&rule(&[Noun::Keke], Action::Win)));
        assert!(!scan.rules.contains(&rule(&[Noun::Keke], Action::You)));
    }

    #[test]
    fn test_stacked_row_run_count_is_linear() {
        let cols = 24;
        let mut grid = Grid::new(1, cols);
        for col in 0..cols {
            let pos = Position::new(0, col as i32);
            grid.place(GameObject::text("IS", pos)).unwrap();
            grid.place(GameObject::text("AND", pos)).unwrap();
        }

        let runs = find_runs(&grid);

        // Two tiles per cell, two directions per tile.
        assert_eq!(runs.len(), 2 * 2 * cols);
        assert!(runs.iter().all(|r| r.words.len() <= cols));
        let longest = runs
            .iter()
            .find(|r| r.origin == Position::new(0, 0) && r.direction == Direction::Right)
            .unwrap();
        assert_eq!(longest.words.len(), cols);
        assert!(longest.words[1..].iter().all(|w| w == "AND"));
    }

    #[test]
    fn test_unknown_words_are_inert() {
        let mut grid = Grid::new(2, 3);
        place_words(&mut grid, Position::new(0, 0), Direction::Right, &["BABA", "IS", "ZORP"]);
        place_words(&mut grid, Position::new(1, 0), Direction::Right, &["ROCK", "IS", "STOP"]);

        let scan = scan_rules(&grid);

        assert_eq!(scan.rules.len(), 1);
        assert!(scan.rules.grants(Noun::Rock, Action::Stop));
        assert!(scan
            .rejected
            .iter()
            .any(|r| matches!(r.error, ParseError::UnknownWord { .. })));
    }

    #[test]
    fn test_scan_is_deterministic() {
        let mut grid = Grid::new(3, 3);
        place_words(&mut grid, Position::new(0, 0), Direction::Right, &["BABA", "IS", "YOU"]);
        place_words(&mut grid, Position::new(0, 0), Direction::Down, &["BABA", "IS", "WIN"]);
        let before = grid.clone();

        let first = scan_rules(&grid);
        let second = scan_rules(&grid);

        assert_eq!(first, second);
        assert_eq!(grid, before);
    }
}

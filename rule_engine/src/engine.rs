//! Engine - the per-tick pipeline.
//!
//! Each tick:
//! 1. **Scan**: read every run of text and parse the active rules
//! 2. **Transform**: apply `X IS Y` rules once
//! 3. **Capabilities**: build the flag table from the rules
//! 4. **Move**: plan every controllable object's step, then commit
//! 5. **Hazards**: sink and melt
//! 6. **Outcome**: rescan the board (text may have moved) and check win/loss

use grid_world::{load_grid, Direction, Grid, GridError, LevelData, RenderView};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::events::{EventLog, TickEvent};
use crate::resolver::{
    apply_transformations, evaluate_outcome, resolve_hazards, resolve_move, AttemptStatus,
    CapabilityTable, MoveAttempt, MoveResolution, Outcome,
};
use crate::rules::{scan_rules, RuleSet};

/// Configuration for the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Longest push chain, in pushed cells. `None` uses rows + cols.
    pub max_push_depth: Option<usize>,

    /// Run the sink/melt pass after movement.
    pub resolve_hazards: bool,

    /// Collect events into tick reports.
    pub record_events: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_push_depth: None,
            resolve_hazards: true,
            record_events: true,
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from TOML. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, EngineError> {
        Ok(toml::from_str(source)?)
    }
}

/// Player input for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Input {
    Move(Direction),
    /// Let a tick pass without moving.
    Wait,
}

impl From<Direction> for Input {
    fn from(direction: Direction) -> Self {
        Input::Move(direction)
    }
}

/// What one tick did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickReport {
    pub turn: u64,
    pub outcome: Outcome,
    /// Rules readable from the board after the tick.
    pub active_rules: RuleSet,
    pub attempts: Vec<MoveAttempt>,
    pub events: Vec<TickEvent>,
}

impl TickReport {
    /// Number of controllable objects whose move was committed.
    pub fn committed_count(&self) -> usize {
        self.attempts
            .iter()
            .filter(|a| a.status == AttemptStatus::Committed)
            .count()
    }
}

/// Owns the grid and runs ticks against it.
#[derive(Debug, Clone)]
pub struct Engine {
    grid: Grid,
    config: EngineConfig,
    turn: u64,
    outcome: Outcome,
    rules: RuleSet,
    capabilities: CapabilityTable,
}

impl Engine {
    /// Build an engine from level data. A malformed level is the only
    /// load-time failure.
    pub fn new(level: &LevelData, config: EngineConfig) -> Result<Self, EngineError> {
        let grid = load_grid(level)?;
        Self::from_grid(grid, config)
    }

    /// Build an engine around an existing grid, checking it the same way a
    /// loaded level is checked.
    pub fn from_grid(grid: Grid, config: EngineConfig) -> Result<Self, EngineError> {
        grid.validate().map_err(GridError::from)?;
        let rules = scan_rules(&grid).rules;
        let capabilities = CapabilityTable::build(&rules, &grid);
        Ok(Self {
            grid,
            config,
            turn: 0,
            outcome: Outcome::Continue,
            rules,
            capabilities,
        })
    }

    /// Run one tick.
    ///
    /// Once the outcome is Win or Loss the level is over: later ticks leave
    /// the grid untouched and report the same outcome.
    pub fn tick(&mut self, input: Input) -> Result<TickReport, EngineError> {
        if self.outcome.is_terminal() {
            return Ok(TickReport {
                turn: self.turn,
                outcome: self.outcome,
                active_rules: self.rules.clone(),
                attempts: Vec::new(),
                events: Vec::new(),
            });
        }

        self.turn += 1;
        let mut log = EventLog::new(self.config.record_events);

        let scan = scan_rules(&self.grid);
        log.extend(&scan.rejected);

        let transformations = apply_transformations(&mut self.grid, &scan.rules)?;
        log.extend(&transformations);

        let table = CapabilityTable::build(&scan.rules, &self.grid);

        let resolution = match input {
            Input::Move(direction) => resolve_move(
                &mut self.grid,
                &table,
                direction,
                self.config.max_push_depth,
            )?,
            Input::Wait => MoveResolution::default(),
        };
        log.extend(&resolution.steps);
        for attempt in &resolution.attempts {
            if let AttemptStatus::Rejected(reason) = attempt.status {
                log.record(TickEvent::MoveRejected {
                    object: attempt.object,
                    position: attempt.from,
                    reason,
                });
            }
        }

        if self.config.resolve_hazards {
            let destroyed = resolve_hazards(&mut self.grid, &table)?;
            log.extend(&destroyed);
        }

        self.rules = scan_rules(&self.grid).rules;
        self.capabilities = CapabilityTable::build(&self.rules, &self.grid);
        self.outcome = evaluate_outcome(&self.grid, &self.capabilities);
        if self.outcome.is_terminal() {
            log.record(TickEvent::OutcomeReached {
                outcome: self.outcome,
            });
        }

        Ok(TickReport {
            turn: self.turn,
            outcome: self.outcome,
            active_rules: self.rules.clone(),
            attempts: resolution.attempts,
            events: log.into_events(),
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Ticks run so far.
    pub fn turn(&self) -> u64 {
        self.turn
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Rules read from the board at the end of the last tick.
    pub fn active_rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Capabilities derived from [`Engine::active_rules`].
    pub fn capabilities(&self) -> &CapabilityTable {
        &self.capabilities
    }

    /// Top-most object of every cell.
    pub fn render_view(&self) -> RenderView {
        RenderView::of(&self.grid)
    }

    /// Hand the grid back, ending the engine.
    pub fn into_grid(self) -> Grid {
        self.grid
    }
}

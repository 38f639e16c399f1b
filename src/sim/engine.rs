//! Simulation engine: the phase state machine around `tick`
//!
//! The engine owns all game state and never touches rendering, storage or
//! audio. Hosts call its operations and drain the events it queues.

use serde::Serialize;
use thiserror::Error;

use super::difficulty::{Difficulty, DifficultyProfile};
use super::direction::Direction;
use super::food::place_food;
use super::state::{Cell, GameOverReason, GamePhase, GameState};
use super::tick::{TickOutcome, tick};
use crate::consts::{MAX_GRID_COUNT, MIN_GRID_COUNT};

/// Operation not allowed in the current phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("cannot {operation} while {phase:?}")]
    IllegalTransition {
        operation: &'static str,
        phase: GamePhase,
    },
}

/// Notifications for collaborators (display, high score, audio)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    PhaseChanged(GamePhase),
    ScoreChanged(u32),
    FoodEaten(Cell),
    GameOver(GameOverReason),
    DifficultyChanged(Difficulty),
    SpeedChanged(u32),
}

/// Read-only view for renderers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub grid_count: i32,
    pub snake: Vec<Cell>,
    pub food: Option<Cell>,
    pub direction: Direction,
    pub phase: GamePhase,
    pub score: u32,
    pub speed_ms: u32,
    pub difficulty: Difficulty,
    pub over_reason: Option<GameOverReason>,
}

/// Engine construction parameters
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    pub grid_count: i32,
    pub difficulty: Difficulty,
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid_count: crate::consts::GRID_COUNT,
            difficulty: Difficulty::default(),
            seed: 0,
        }
    }
}

pub struct SimulationEngine {
    state: GameState,
    events: Vec<GameEvent>,
    /// Clock reading of the last applied tick; None means nothing scheduled
    last_tick_ms: Option<u64>,
}

impl SimulationEngine {
    /// Build an idle engine. The grid size is clamped to
    /// `MIN_GRID_COUNT..=MAX_GRID_COUNT`.
    pub fn new(config: EngineConfig) -> Self {
        let grid_count = config.grid_count.clamp(MIN_GRID_COUNT, MAX_GRID_COUNT);
        if grid_count != config.grid_count {
            log::warn!(
                "Grid size {} out of range, using {}",
                config.grid_count,
                grid_count
            );
        }
        Self {
            state: GameState::new(config.seed, grid_count, config.difficulty),
            events: Vec::new(),
            last_tick_ms: None,
        }
    }

    /// Switch difficulty between runs
    pub fn select_difficulty(&mut self, difficulty: Difficulty) -> Result<(), EngineError> {
        if !self.state.phase.allows_difficulty_change() {
            return Err(self.illegal("select difficulty"));
        }
        self.state.difficulty = difficulty;
        self.set_speed(difficulty.profile().base_speed_ms);
        self.events.push(GameEvent::DifficultyChanged(difficulty));
        Ok(())
    }

    /// Begin a run from Idle
    pub fn start(&mut self) -> Result<(), EngineError> {
        if self.state.phase != GamePhase::Idle {
            return Err(self.illegal("start"));
        }
        self.state.clear_run();
        self.state.spawn_snake();
        self.state.food = place_food(&mut self.state);
        self.last_tick_ms = None;
        log::info!(
            "Run started on {} ({} ms/tick)",
            self.state.difficulty.as_str(),
            self.state.speed_ms
        );
        self.events.push(GameEvent::ScoreChanged(0));
        self.set_phase(GamePhase::Running);
        Ok(())
    }

    /// Buffer a turn for the next tick. Returns whether it was accepted.
    pub fn set_input_direction(&mut self, dir: Direction) -> bool {
        if self.state.phase != GamePhase::Running {
            return false;
        }
        self.state.direction.request(dir)
    }

    pub fn pause(&mut self) -> bool {
        if self.state.phase != GamePhase::Running {
            return false;
        }
        self.set_phase(GamePhase::Paused);
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.state.phase != GamePhase::Paused {
            return false;
        }
        // Re-anchor on the next clock reading so the pause does not count
        self.last_tick_ms = None;
        self.set_phase(GamePhase::Running);
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.state.phase {
            GamePhase::Running => self.pause(),
            GamePhase::Paused => self.resume(),
            _ => false,
        }
    }

    /// Apply one step unconditionally (when running)
    pub fn tick(&mut self) -> TickOutcome {
        let speed_before = self.state.speed_ms;
        let outcome = tick(&mut self.state);
        match outcome {
            TickOutcome::Ate { at, score } => {
                self.events.push(GameEvent::ScoreChanged(score));
                self.events.push(GameEvent::FoodEaten(at));
                if self.state.speed_ms != speed_before {
                    self.events.push(GameEvent::SpeedChanged(self.state.speed_ms));
                }
            }
            TickOutcome::Collided(reason) => {
                log::info!(
                    "Game over: {} (score {})",
                    reason.message(),
                    self.state.score
                );
                self.last_tick_ms = None;
                self.events.push(GameEvent::GameOver(reason));
                self.events.push(GameEvent::PhaseChanged(GamePhase::Over));
            }
            TickOutcome::Moved | TickOutcome::Skipped => {}
        }
        outcome
    }

    /// Tick if at least `speed_ms` passed since the last applied tick.
    ///
    /// The first reading after start or resume only anchors the clock.
    pub fn advance(&mut self, now_ms: u64) -> Option<TickOutcome> {
        if self.state.phase != GamePhase::Running {
            return None;
        }
        let Some(last) = self.last_tick_ms else {
            self.last_tick_ms = Some(now_ms);
            return None;
        };
        if now_ms.saturating_sub(last) < u64::from(self.state.speed_ms) {
            return None;
        }
        self.last_tick_ms = Some(now_ms);
        let outcome = self.tick();
        if self.state.phase != GamePhase::Running {
            self.last_tick_ms = None;
        }
        Some(outcome)
    }

    /// Drop the run and return to Idle. Safe from any phase.
    pub fn restart(&mut self) {
        self.last_tick_ms = None;
        let was_idle = self.state.phase == GamePhase::Idle;
        self.state.clear_run();
        self.events.push(GameEvent::ScoreChanged(0));
        if !was_idle {
            self.set_phase(GamePhase::Idle);
        }
    }

    /// True while a tick is scheduled against the clock
    pub fn tick_scheduled(&self) -> bool {
        self.last_tick_ms.is_some()
    }

    /// Take all events queued since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            grid_count: self.state.grid_count,
            snake: self.state.snake.iter().copied().collect(),
            food: self.state.food,
            direction: self.state.direction.current(),
            phase: self.state.phase,
            score: self.state.score,
            speed_ms: self.state.speed_ms,
            difficulty: self.state.difficulty,
            over_reason: self.state.over_reason,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn speed_ms(&self) -> u32 {
        self.state.speed_ms
    }

    pub fn difficulty(&self) -> Difficulty {
        self.state.difficulty
    }

    pub fn profile(&self) -> DifficultyProfile {
        self.state.difficulty.profile()
    }

    pub fn direction(&self) -> Direction {
        self.state.direction.current()
    }

    pub fn food(&self) -> Option<Cell> {
        self.state.food
    }

    pub fn snake_len(&self) -> usize {
        self.state.snake.len()
    }

    pub fn head(&self) -> Option<Cell> {
        self.state.head()
    }

    pub fn over_reason(&self) -> Option<GameOverReason> {
        self.state.over_reason
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    fn set_phase(&mut self, phase: GamePhase) {
        if self.state.phase != phase {
            self.state.phase = phase;
            self.events.push(GameEvent::PhaseChanged(phase));
        }
    }

    fn set_speed(&mut self, speed_ms: u32) {
        if self.state.speed_ms != speed_ms {
            self.state.speed_ms = speed_ms;
            self.events.push(GameEvent::SpeedChanged(speed_ms));
        }
    }

    fn illegal(&self, operation: &'static str) -> EngineError {
        log::debug!("Rejected {} in {:?}", operation, self.state.phase);
        EngineError::IllegalTransition {
            operation,
            phase: self.state.phase,
        }
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;
    use proptest::prelude::*;

    fn engine() -> SimulationEngine {
        SimulationEngine::new(EngineConfig {
            seed: 12345,
            ..Default::default()
        })
    }

    /// Put the food somewhere the snake will not reach soon
    fn park_food(engine: &mut SimulationEngine) {
        engine.state_mut().food = Some(IVec2::new(0, 0));
    }

    #[test]
    fn test_start_lays_out_snake() {
        let mut engine = engine();
        assert_eq!(engine.phase(), GamePhase::Idle);
        engine.start().unwrap();
        assert_eq!(engine.phase(), GamePhase::Running);
        let snap = engine.snapshot();
        assert_eq!(
            snap.snake,
            vec![IVec2::new(15, 15), IVec2::new(14, 15), IVec2::new(13, 15)]
        );
        assert_eq!(snap.direction, Direction::Right);
        assert_eq!(snap.score, 0);
        assert_eq!(snap.speed_ms, 150);
        let food = snap.food.unwrap();
        assert!(!snap.snake.contains(&food));
    }

    #[test]
    fn test_start_twice_is_rejected() {
        let mut engine = engine();
        engine.start().unwrap();
        assert_eq!(
            engine.start(),
            Err(EngineError::IllegalTransition {
                operation: "start",
                phase: GamePhase::Running
            })
        );
        assert_eq!(engine.phase(), GamePhase::Running);

        engine.pause();
        assert_eq!(
            engine.start(),
            Err(EngineError::IllegalTransition {
                operation: "start",
                phase: GamePhase::Paused
            })
        );
        assert_eq!(engine.phase(), GamePhase::Paused);

        engine.resume();
        engine.state_mut().snake =
            [IVec2::new(29, 3), IVec2::new(28, 3), IVec2::new(27, 3)].into();
        engine.tick();
        assert_eq!(
            engine.start(),
            Err(EngineError::IllegalTransition {
                operation: "start",
                phase: GamePhase::Over
            })
        );
        assert_eq!(engine.phase(), GamePhase::Over);
    }

    #[test]
    fn test_grid_size_is_clamped() {
        let cases = [
            (2, MIN_GRID_COUNT),
            (-5, MIN_GRID_COUNT),
            (0, MIN_GRID_COUNT),
            (500, MAX_GRID_COUNT),
        ];
        for (requested, expected) in cases {
            let mut engine = SimulationEngine::new(EngineConfig {
                grid_count: requested,
                seed: 3,
                ..Default::default()
            });
            engine.start().unwrap();
            let snap = engine.snapshot();
            assert_eq!(snap.grid_count, expected);
            let state = engine.state();
            assert!(state.snake.iter().all(|&c| state.in_bounds(c)));
            let food = snap.food.unwrap();
            assert!(state.in_bounds(food));
            assert!(!snap.snake.contains(&food));
        }
    }

    #[test]
    fn test_difficulty_locked_while_running() {
        let mut engine = engine();
        engine.start().unwrap();
        assert!(engine.select_difficulty(Difficulty::Hard).is_err());
        assert_eq!(engine.difficulty(), Difficulty::Normal);
        assert_eq!(engine.speed_ms(), 150);

        engine.pause();
        assert!(engine.select_difficulty(Difficulty::Hard).is_err());
        assert_eq!(engine.difficulty(), Difficulty::Normal);
    }

    #[test]
    fn test_difficulty_change_when_idle_or_over() {
        let mut engine = engine();
        engine.select_difficulty(Difficulty::Easy).unwrap();
        assert_eq!(engine.speed_ms(), 200);
        assert_eq!(engine.phase(), GamePhase::Idle);

        engine.start().unwrap();
        engine.state_mut().snake = [(29, 3), (28, 3), (27, 3)]
            .iter()
            .map(|&(x, y)| IVec2::new(x, y))
            .collect();
        engine.tick();
        assert_eq!(engine.phase(), GamePhase::Over);
        engine.select_difficulty(Difficulty::Hard).unwrap();
        assert_eq!(engine.difficulty(), Difficulty::Hard);
        assert_eq!(engine.speed_ms(), 100);
        assert_eq!(engine.phase(), GamePhase::Over);
    }

    #[test]
    fn test_direction_ignored_unless_running() {
        let mut engine = engine();
        assert!(!engine.set_input_direction(Direction::Up));
        engine.start().unwrap();
        engine.pause();
        assert!(!engine.set_input_direction(Direction::Up));
        engine.resume();
        assert!(engine.set_input_direction(Direction::Up));
    }

    #[test]
    fn test_reversal_guard_through_engine() {
        let mut engine = engine();
        engine.start().unwrap();
        park_food(&mut engine);
        assert!(!engine.set_input_direction(Direction::Left));
        assert_eq!(engine.tick(), TickOutcome::Moved);
        assert_eq!(engine.direction(), Direction::Right);
        assert_eq!(engine.head(), Some(IVec2::new(16, 15)));
    }

    #[test]
    fn test_pause_resume() {
        let mut engine = engine();
        assert!(!engine.pause());
        engine.start().unwrap();
        assert!(engine.toggle_pause());
        assert_eq!(engine.phase(), GamePhase::Paused);
        assert_eq!(engine.tick(), TickOutcome::Skipped);
        assert!(!engine.pause());
        assert!(engine.toggle_pause());
        assert_eq!(engine.phase(), GamePhase::Running);
        assert!(!engine.resume());
    }

    #[test]
    fn test_restart_is_idempotent() {
        let mut engine = engine();
        engine.select_difficulty(Difficulty::Hard).unwrap();
        engine.start().unwrap();
        engine.state_mut().snake = [(29, 3), (28, 3), (27, 3)]
            .iter()
            .map(|&(x, y)| IVec2::new(x, y))
            .collect();
        engine.state_mut().score = 70;
        engine.tick();
        assert_eq!(engine.phase(), GamePhase::Over);

        engine.restart();
        let first = engine.snapshot();
        engine.restart();
        let second = engine.snapshot();
        assert_eq!(first, second);
        assert_eq!(first.phase, GamePhase::Idle);
        assert!(first.snake.is_empty());
        assert_eq!(first.food, None);
        assert_eq!(first.score, 0);
        assert_eq!(first.speed_ms, 100);
        assert_eq!(first.difficulty, Difficulty::Hard);
    }

    #[test]
    fn test_restart_cancels_scheduled_tick() {
        let mut engine = engine();
        engine.start().unwrap();
        park_food(&mut engine);
        assert_eq!(engine.advance(1_000), None);
        assert!(engine.tick_scheduled());

        engine.restart();
        assert!(!engine.tick_scheduled());
        // A stale frame after restart must not move anything
        assert_eq!(engine.advance(5_000), None);
        assert_eq!(engine.phase(), GamePhase::Idle);

        // A new run anchors fresh instead of ticking on the old timestamp
        engine.start().unwrap();
        assert_eq!(engine.advance(5_001), None);
        assert_eq!(engine.head(), Some(IVec2::new(15, 15)));
    }

    #[test]
    fn test_advance_respects_speed() {
        let mut engine = engine();
        engine.start().unwrap();
        park_food(&mut engine);
        assert_eq!(engine.advance(0), None);
        assert_eq!(engine.advance(149), None);
        assert_eq!(engine.advance(150), Some(TickOutcome::Moved));
        assert_eq!(engine.advance(200), None);
        assert_eq!(engine.advance(300), Some(TickOutcome::Moved));
        assert_eq!(engine.head(), Some(IVec2::new(17, 15)));
    }

    #[test]
    fn test_pause_time_is_not_counted() {
        let mut engine = engine();
        engine.start().unwrap();
        park_food(&mut engine);
        engine.advance(0);
        engine.pause();
        assert_eq!(engine.advance(10_000), None);
        engine.resume();
        assert_eq!(engine.advance(10_000), None);
        assert_eq!(engine.advance(10_100), None);
        assert_eq!(engine.advance(10_150), Some(TickOutcome::Moved));
    }

    #[test]
    fn test_events() {
        let mut engine = engine();
        engine.start().unwrap();
        assert_eq!(
            engine.drain_events(),
            vec![
                GameEvent::ScoreChanged(0),
                GameEvent::PhaseChanged(GamePhase::Running)
            ]
        );

        engine.state_mut().food = Some(IVec2::new(16, 15));
        engine.tick();
        assert_eq!(
            engine.drain_events(),
            vec![
                GameEvent::ScoreChanged(10),
                GameEvent::FoodEaten(IVec2::new(16, 15))
            ]
        );

        engine.state_mut().snake.push_front(IVec2::new(29, 15));
        engine.tick();
        assert_eq!(
            engine.drain_events(),
            vec![
                GameEvent::GameOver(GameOverReason::Wall),
                GameEvent::PhaseChanged(GamePhase::Over)
            ]
        );
        assert!(engine.drain_events().is_empty());
    }

    #[test]
    fn test_normal_profile_scenario() {
        let mut engine = engine();
        engine.select_difficulty(Difficulty::Normal).unwrap();
        engine.start().unwrap();
        assert_eq!(engine.speed_ms(), 150);
        park_food(&mut engine);

        for _ in 0..3 {
            assert_eq!(engine.tick(), TickOutcome::Moved);
        }
        assert_eq!(engine.snake_len(), 3);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.head(), Some(IVec2::new(18, 15)));

        engine.state_mut().food = Some(IVec2::new(19, 15));
        assert_eq!(
            engine.tick(),
            TickOutcome::Ate {
                at: IVec2::new(19, 15),
                score: 10
            }
        );
        assert_eq!(engine.score(), 10);
        assert_eq!(engine.snake_len(), 4);
        assert_eq!(engine.speed_ms(), 150);
        let food = engine.food().unwrap();
        assert!(!engine.snapshot().snake.contains(&food));
    }

    proptest! {
        #[test]
        fn random_play_keeps_invariants(
            seed in any::<u64>(),
            moves in proptest::collection::vec(0usize..4, 1..200),
        ) {
            let mut engine = SimulationEngine::new(EngineConfig {
                seed,
                grid_count: 12,
                ..Default::default()
            });
            engine.start().unwrap();
            let mut last_speed = engine.speed_ms();
            for m in moves {
                engine.set_input_direction(Direction::ALL[m]);
                engine.tick();
                let snap = engine.snapshot();
                if snap.phase != GamePhase::Running {
                    prop_assert_eq!(snap.phase, GamePhase::Over);
                    break;
                }
                let mut cells = snap.snake.clone();
                cells.sort_by_key(|c| (c.x, c.y));
                cells.dedup();
                prop_assert_eq!(cells.len(), snap.snake.len());
                prop_assert_eq!(snap.snake.len(), 3 + (snap.score / 10) as usize);
                if let Some(food) = snap.food {
                    prop_assert!(!snap.snake.contains(&food));
                }
                prop_assert!(snap.speed_ms <= last_speed);
                prop_assert!(snap.speed_ms >= engine.profile().floor_ms());
                last_speed = snap.speed_ms;
            }
        }
    }
}

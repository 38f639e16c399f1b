//! Game state and core simulation types

use std::collections::VecDeque;

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::direction::{Direction, DirectionBuffer};
use super::difficulty::Difficulty;
use crate::consts::*;

/// A grid cell (x, y), both in `0..grid_count`
pub type Cell = IVec2;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum GamePhase {
    /// Waiting for start
    #[default]
    Idle,
    /// Snake moving
    Running,
    /// Game is paused
    Paused,
    /// Run ended, waiting for restart
    Over,
}

impl GamePhase {
    /// Difficulty may only change between runs
    pub fn allows_difficulty_change(&self) -> bool {
        matches!(self, GamePhase::Idle | GamePhase::Over)
    }
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    Wall,
    SelfCollision,
}

impl GameOverReason {
    pub fn message(&self) -> &'static str {
        match self {
            GameOverReason::Wall => "Hit the wall!",
            GameOverReason::SelfCollision => "Ran into yourself!",
        }
    }
}

/// Complete simulation state (deterministic for a given seed)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Food placement RNG
    pub rng: Pcg32,
    /// Cells per row and per column
    pub grid_count: i32,
    /// Snake body, head first
    pub snake: VecDeque<Cell>,
    /// Applied and pending heading
    pub direction: DirectionBuffer,
    /// Current food cell (None only when the snake fills the grid)
    pub food: Option<Cell>,
    pub score: u32,
    /// Milliseconds between ticks
    pub speed_ms: u32,
    pub difficulty: Difficulty,
    pub phase: GamePhase,
    pub over_reason: Option<GameOverReason>,
    /// Applied ticks since start
    pub time_ticks: u64,
}

impl GameState {
    /// Create an idle state with the given seed
    pub fn new(seed: u64, grid_count: i32, difficulty: Difficulty) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            grid_count,
            snake: VecDeque::new(),
            direction: DirectionBuffer::new(Direction::Right),
            food: None,
            score: 0,
            speed_ms: difficulty.profile().base_speed_ms,
            difficulty,
            phase: GamePhase::Idle,
            over_reason: None,
            time_ticks: 0,
        }
    }

    /// Lay out a fresh snake: horizontal, centred, heading right
    pub fn spawn_snake(&mut self) {
        let center = self.grid_count / 2;
        self.snake.clear();
        for i in 0..INITIAL_SNAKE_LEN as i32 {
            self.snake.push_back(IVec2::new(center - i, center));
        }
        self.direction.reset(Direction::Right);
    }

    /// Clear the run, keeping seed, RNG stream and difficulty
    pub fn clear_run(&mut self) {
        self.snake.clear();
        self.direction.reset(Direction::Right);
        self.food = None;
        self.score = 0;
        self.speed_ms = self.difficulty.profile().base_speed_ms;
        self.over_reason = None;
        self.time_ticks = 0;
    }

    pub fn head(&self) -> Option<Cell> {
        self.snake.front().copied()
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        (0..self.grid_count).contains(&cell.x) && (0..self.grid_count).contains(&cell.y)
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.snake.contains(&cell)
    }

    pub fn cell_count(&self) -> usize {
        (self.grid_count * self.grid_count) as usize
    }
}

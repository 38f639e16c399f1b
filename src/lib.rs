//! Grid Snake - a classic snake game on a fixed grid
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, food, speed)
//! - `game`: Host that wires the simulation to clock, storage and feedback
//! - `persistence`: Key/value storage backends
//! - `highscores`: Per-difficulty high scores with legacy migration
//! - `settings`: Player preferences
//! - `input`, `renderer`, `audio`, `platform`: Thin collaborator interfaces

pub mod audio;
pub mod autopilot;
pub mod game;
pub mod highscores;
pub mod input;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use game::{Frame, Game};
pub use highscores::HighScores;
pub use settings::Settings;
pub use sim::{Difficulty, DifficultyProfile, GamePhase, SimulationEngine};

/// Game configuration constants
pub mod consts {
    /// Cells per row and per column
    pub const GRID_COUNT: i32 = 30;
    /// Smallest and largest grid a settings file may ask for
    pub const MIN_GRID_COUNT: i32 = 8;
    pub const MAX_GRID_COUNT: i32 = 64;

    /// Snake length at spawn
    pub const INITIAL_SNAKE_LEN: usize = 3;

    /// Points per food eaten
    pub const FOOD_SCORE: u32 = 10;
    /// Score needed per speed level
    pub const LEVEL_SCORE_STEP: u32 = 50;

    /// Random draws before food placement falls back to enumerating free cells
    pub const FOOD_PLACEMENT_ATTEMPTS: u32 = 64;
}

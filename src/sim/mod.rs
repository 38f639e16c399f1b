//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One cell per tick, timing decided by the caller's clock
//! - Seeded RNG only
//! - No rendering, storage or platform dependencies

pub mod difficulty;
pub mod direction;
pub mod engine;
pub mod food;
pub mod state;
pub mod tick;

pub use difficulty::{Difficulty, DifficultyProfile};
pub use direction::{Direction, DirectionBuffer};
pub use engine::{EngineConfig, EngineError, GameEvent, SimulationEngine, Snapshot};
pub use food::place_food;
pub use state::{Cell, GameOverReason, GamePhase, GameState};
pub use tick::{TickOutcome, tick};

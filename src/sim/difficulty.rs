//! Difficulty profiles and the speed model

use serde::{Deserialize, Serialize};

use crate::consts::LEVEL_SCORE_STEP;

/// Built-in difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    /// Stable key used for storage and display
    pub fn as_str(&self) -> &'static str {
        self.profile().name
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "medium" | "classic" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn profile(&self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile::EASY,
            Difficulty::Normal => DifficultyProfile::NORMAL,
            Difficulty::Hard => DifficultyProfile::HARD,
        }
    }
}

/// Speed parameters for one difficulty
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyProfile {
    pub name: &'static str,
    /// Milliseconds per tick at score 0
    pub base_speed_ms: u32,
    /// Milliseconds shaved off per level
    pub speed_increment_ms: u32,
    /// Fastest allowed tick as a fraction of the base
    pub min_speed_factor: f32,
}

impl DifficultyProfile {
    pub const EASY: Self = Self {
        name: "easy",
        base_speed_ms: 200,
        speed_increment_ms: 8,
        min_speed_factor: 0.5,
    };

    /// Also the behaviour of the classic game without difficulty selection
    pub const NORMAL: Self = Self {
        name: "normal",
        base_speed_ms: 150,
        speed_increment_ms: 10,
        min_speed_factor: 0.5,
    };

    pub const HARD: Self = Self {
        name: "hard",
        base_speed_ms: 100,
        speed_increment_ms: 12,
        min_speed_factor: 0.5,
    };

    /// Fastest tick interval this profile allows
    pub fn floor_ms(&self) -> u32 {
        ((self.base_speed_ms as f32 * self.min_speed_factor).round() as u32).max(1)
    }

    /// Tick interval for a given score.
    ///
    /// One level per 50 points, each level `speed_increment_ms` faster,
    /// never below `floor_ms`.
    pub fn speed_for_score(&self, score: u32) -> u32 {
        let level = score / LEVEL_SCORE_STEP;
        let reduction = level.saturating_mul(self.speed_increment_ms);
        self.base_speed_ms
            .saturating_sub(reduction)
            .max(self.floor_ms())
    }
}

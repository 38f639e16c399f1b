//! Per-difficulty high scores
//!
//! Stored as plain integers under `snake_high_score_<difficulty>`. Saves
//! from before difficulty selection used a single `snake_high_score` key;
//! that value seeds any difficulty without its own entry.

use std::collections::HashMap;

use crate::persistence::Storage;
use crate::sim::Difficulty;

/// Key used before scores were split by difficulty
pub const LEGACY_KEY: &str = "snake_high_score";

/// Best score per difficulty
#[derive(Debug, Clone, Default)]
pub struct HighScores {
    best: HashMap<Difficulty, u32>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn storage_key(difficulty: Difficulty) -> String {
        format!("{}_{}", LEGACY_KEY, difficulty.as_str())
    }

    /// Load every difficulty from storage
    pub fn load<S: Storage>(storage: &S) -> Self {
        let best = Difficulty::ALL
            .iter()
            .map(|&d| (d, load_high_score(storage, d)))
            .collect();
        Self { best }
    }

    pub fn get(&self, difficulty: Difficulty) -> u32 {
        self.best.get(&difficulty).copied().unwrap_or(0)
    }

    /// Check if a score beats the stored best
    pub fn is_record(&self, difficulty: Difficulty, score: u32) -> bool {
        score > 0 && score > self.get(difficulty)
    }

    /// Raise the best score if `score` beats it, saving the new value.
    /// Returns true on a new record.
    pub fn record<S: Storage>(&mut self, storage: &mut S, difficulty: Difficulty, score: u32) -> bool {
        if !self.is_record(difficulty, score) {
            return false;
        }
        self.best.insert(difficulty, score);
        save_high_score(storage, difficulty, score);
        true
    }
}

/// Read one difficulty's best score. Missing or unreadable values count as 0.
pub fn load_high_score<S: Storage>(storage: &S, difficulty: Difficulty) -> u32 {
    let key = HighScores::storage_key(difficulty);
    if let Some(score) = read_score(storage, &key) {
        return score;
    }
    match read_score(storage, LEGACY_KEY) {
        Some(score) => {
            log::info!("Using legacy high score {} for {}", score, difficulty.as_str());
            score
        }
        None => 0,
    }
}

/// Write one difficulty's best score. Failures are logged and skipped.
pub fn save_high_score<S: Storage>(storage: &mut S, difficulty: Difficulty, score: u32) {
    let key = HighScores::storage_key(difficulty);
    match storage.set_item(&key, &score.to_string()) {
        Ok(()) => log::info!("High score saved ({} on {})", score, difficulty.as_str()),
        Err(e) => log::warn!("Could not save high score: {}", e),
    }
}

fn read_score<S: Storage>(storage: &S, key: &str) -> Option<u32> {
    match storage.get_item(key) {
        Ok(Some(raw)) => match raw.trim().parse() {
            Ok(score) => Some(score),
            Err(_) => {
                log::warn!("Ignoring malformed high score {:?} under {}", raw, key);
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            log::warn!("Could not load high score: {}", e);
            None
        }
    }
}

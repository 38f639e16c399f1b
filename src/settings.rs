//! Game settings and preferences
//!
//! Persisted as JSON next to the high scores.

use serde::{Deserialize, Serialize};

use crate::consts::{GRID_COUNT, MAX_GRID_COUNT, MIN_GRID_COUNT};
use crate::persistence::{Storage, StorageError};
use crate::sim::{Difficulty, EngineConfig};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Difficulty picked last time
    pub difficulty: Difficulty,
    /// Cells per side
    pub grid_count: i32,
    /// Eat/crash feedback
    pub sound: bool,
    /// Fixed food seed (random per run when unset)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            grid_count: GRID_COUNT,
            sound: true,
            seed: None,
        }
    }
}

impl Settings {
    /// Storage key
    const STORAGE_KEY: &'static str = "snake_settings";

    /// Grid size limited to what the game supports
    pub fn effective_grid_count(&self) -> i32 {
        self.grid_count.clamp(MIN_GRID_COUNT, MAX_GRID_COUNT)
    }

    /// Engine parameters, drawing a seed when none is configured
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            grid_count: self.effective_grid_count(),
            difficulty: self.difficulty,
            seed: self.seed.unwrap_or_else(rand::random),
        }
    }

    /// Load settings, falling back to defaults
    pub fn load<S: Storage>(storage: &S) -> Self {
        match storage.get_item(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<Settings>(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring malformed settings: {}", e),
            },
            Ok(None) => {}
            Err(e) => log::warn!("Could not load settings: {}", e),
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings. Failures are logged and skipped.
    pub fn save<S: Storage>(&self, storage: &mut S) {
        let result = serde_json::to_string(self)
            .map_err(StorageError::from)
            .and_then(|json| storage.set_item(Self::STORAGE_KEY, &json));
        match result {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Could not save settings: {}", e),
        }
    }
}

//! Game host
//!
//! Owns the simulation engine plus its collaborators (storage, clock,
//! feedback), routes player input, and turns engine events into high score
//! updates and sound cues.

use crate::audio::{Feedback, SoundEffect};
use crate::highscores::HighScores;
use crate::input::{InputAction, action_for_key};
use crate::persistence::Storage;
use crate::platform::Clock;
use crate::renderer::Renderer;
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, SimulationEngine, Snapshot, TickOutcome};

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Frame {
    pub snapshot: Snapshot,
    /// Best score for the active difficulty
    pub high_score: u32,
    /// The current run has beaten the previous best
    pub new_record: bool,
}

pub struct Game<S, C, F> {
    engine: SimulationEngine,
    settings: Settings,
    high_scores: HighScores,
    new_record: bool,
    storage: S,
    clock: C,
    feedback: F,
}

impl<S: Storage, C: Clock, F: Feedback> Game<S, C, F> {
    /// Build a game from stored settings and high scores
    pub fn new(storage: S, clock: C, feedback: F) -> Self {
        let settings = Settings::load(&storage);
        Self::with_settings(settings, storage, clock, feedback)
    }

    pub fn with_settings(settings: Settings, storage: S, clock: C, feedback: F) -> Self {
        let high_scores = HighScores::load(&storage);
        let engine = SimulationEngine::new(settings.engine_config());
        log::info!(
            "Game ready: {}x{} grid, {} difficulty, best {}",
            settings.effective_grid_count(),
            settings.effective_grid_count(),
            settings.difficulty.as_str(),
            high_scores.get(settings.difficulty)
        );
        Self {
            engine,
            settings,
            high_scores,
            new_record: false,
            storage,
            clock,
            feedback,
        }
    }

    /// Map a key code and apply it. Returns false for unbound keys.
    pub fn handle_key(&mut self, code: &str) -> bool {
        match action_for_key(code) {
            Some(action) => {
                self.handle_action(action);
                true
            }
            None => false,
        }
    }

    pub fn handle_action(&mut self, action: InputAction) {
        match action {
            InputAction::Turn(dir) => {
                if !self.engine.set_input_direction(dir) {
                    log::debug!("Ignored turn {:?}", dir);
                }
            }
            InputAction::Start => {
                if let Err(e) = self.engine.start() {
                    log::debug!("{}", e);
                }
            }
            InputAction::PauseOrRestart => match self.engine.phase() {
                GamePhase::Running | GamePhase::Paused => {
                    self.engine.toggle_pause();
                }
                GamePhase::Over => self.engine.restart(),
                GamePhase::Idle => {}
            },
            InputAction::Restart => self.engine.restart(),
            InputAction::SelectDifficulty(difficulty) => {
                match self.engine.select_difficulty(difficulty) {
                    Ok(()) => {
                        // The record flag belongs to the previous profile
                        self.new_record = false;
                        self.settings.difficulty = difficulty;
                        self.settings.save(&mut self.storage);
                    }
                    Err(e) => log::debug!("{}", e),
                }
            }
        }
        self.process_events();
    }

    /// Read the clock and tick if due
    pub fn update(&mut self) -> Option<TickOutcome> {
        let outcome = self.engine.advance(self.clock.now_ms());
        self.process_events();
        outcome
    }

    /// Update then draw
    pub fn run_frame<R: Renderer + ?Sized>(&mut self, renderer: &mut R) -> Option<TickOutcome> {
        let outcome = self.update();
        renderer.draw(&self.frame());
        outcome
    }

    pub fn frame(&self) -> Frame {
        Frame {
            snapshot: self.engine.snapshot(),
            high_score: self.high_score(),
            new_record: self.new_record,
        }
    }

    pub fn high_score(&self) -> u32 {
        self.high_scores.get(self.engine.difficulty())
    }

    pub fn engine(&self) -> &SimulationEngine {
        &self.engine
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn feedback(&self) -> &F {
        &self.feedback
    }

    fn process_events(&mut self) {
        for event in self.engine.drain_events() {
            match event {
                GameEvent::ScoreChanged(0) => self.new_record = false,
                GameEvent::ScoreChanged(score) => {
                    let difficulty = self.engine.difficulty();
                    if self.high_scores.record(&mut self.storage, difficulty, score)
                        && !self.new_record
                    {
                        self.new_record = true;
                        log::info!("New high score on {}", difficulty.as_str());
                        self.play(SoundEffect::NewRecord);
                    }
                }
                GameEvent::FoodEaten(_) => self.play(SoundEffect::Eat),
                GameEvent::GameOver(_) => self.play(SoundEffect::Crash),
                GameEvent::PhaseChanged(phase) => log::debug!("Phase -> {:?}", phase),
                GameEvent::DifficultyChanged(d) => log::debug!("Difficulty -> {}", d.as_str()),
                GameEvent::SpeedChanged(ms) => log::debug!("Speed -> {} ms", ms),
            }
        }
    }

    fn play(&mut self, effect: SoundEffect) {
        if self.settings.sound {
            self.feedback.play(effect);
        }
    }

    #[cfg(test)]
    pub(crate) fn engine_mut(&mut self) -> &mut SimulationEngine {
        &mut self.engine
    }
}

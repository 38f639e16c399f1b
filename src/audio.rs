//! Audio/feedback interface
//!
//! Feedback is advisory: implementations must swallow their own failures so
//! the simulation never depends on them.

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Food eaten
    Eat,
    /// Wall or self collision
    Crash,
    /// Score passed the stored best
    NewRecord,
}

pub trait Feedback {
    fn play(&mut self, effect: SoundEffect);
}

/// Drops everything
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Feedback for Silent {
    fn play(&mut self, _effect: SoundEffect) {}
}

/// Writes effects to the log (headless builds)
#[derive(Debug, Clone)]
pub struct LogFeedback {
    muted: bool,
}

impl Default for LogFeedback {
    fn default() -> Self {
        Self::new()
    }
}

impl LogFeedback {
    pub fn new() -> Self {
        Self { muted: false }
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }
}

impl Feedback for LogFeedback {
    fn play(&mut self, effect: SoundEffect) {
        if self.muted {
            return;
        }
        log::debug!("sfx: {:?}", effect);
    }
}

/// Records effects, for tests
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    pub played: Vec<SoundEffect>,
}

impl Feedback for Recorder {
    fn play(&mut self, effect: SoundEffect) {
        self.played.push(effect);
    }
}

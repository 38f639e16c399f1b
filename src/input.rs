//! Keyboard mapping
//!
//! Key codes follow `KeyboardEvent.code` names so the browser host can pass
//! them straight through.

use crate::sim::{Difficulty, Direction};

/// Player intent, independent of the key that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Turn(Direction),
    Start,
    /// Pause while playing, resume while paused, restart once over
    PauseOrRestart,
    Restart,
    SelectDifficulty(Difficulty),
}

pub fn action_for_key(code: &str) -> Option<InputAction> {
    let action = match code {
        "ArrowUp" | "KeyW" => InputAction::Turn(Direction::Up),
        "ArrowDown" | "KeyS" => InputAction::Turn(Direction::Down),
        "ArrowLeft" | "KeyA" => InputAction::Turn(Direction::Left),
        "ArrowRight" | "KeyD" => InputAction::Turn(Direction::Right),
        "Space" => InputAction::PauseOrRestart,
        "KeyR" => InputAction::Restart,
        "Enter" | "NumpadEnter" => InputAction::Start,
        "Digit1" | "Numpad1" => InputAction::SelectDifficulty(Difficulty::Easy),
        "Digit2" | "Numpad2" => InputAction::SelectDifficulty(Difficulty::Normal),
        "Digit3" | "Numpad3" => InputAction::SelectDifficulty(Difficulty::Hard),
        _ => return None,
    };
    Some(action)
}

/// Keys whose browser default (scrolling) should be suppressed
pub fn suppresses_default(code: &str) -> bool {
    matches!(
        code,
        "ArrowUp" | "ArrowDown" | "ArrowLeft" | "ArrowRight" | "Space"
    )
}

//! ASCII grid renderer for terminals and logs

use std::fmt::Write;

use glam::IVec2;

use super::Renderer;
use crate::game::Frame;
use crate::sim::GamePhase;

const HEAD: char = '@';
const BODY: char = 'o';
const FOOD: char = '*';
const EMPTY: char = '.';

/// Keeps the most recent frame as text
#[derive(Debug, Default, Clone)]
pub struct TextRenderer {
    pub output: String,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(frame: &Frame) -> String {
        let snap = &frame.snapshot;
        let n = snap.grid_count.max(0);
        let mut out = String::with_capacity(((n + 3) * (n + 3)) as usize);

        let border = "-".repeat(n as usize);
        let _ = writeln!(out, "+{}+", border);
        for y in 0..n {
            out.push('|');
            for x in 0..n {
                let cell = IVec2::new(x, y);
                let ch = match snap.snake.iter().position(|&c| c == cell) {
                    Some(0) => HEAD,
                    Some(_) => BODY,
                    None if snap.food == Some(cell) => FOOD,
                    None => EMPTY,
                };
                out.push(ch);
            }
            out.push_str("|\n");
        }
        let _ = writeln!(out, "+{}+", border);

        let _ = write!(
            out,
            "Score {}  Best {}  {}  {} ms",
            snap.score,
            frame.high_score,
            snap.difficulty.as_str(),
            snap.speed_ms
        );
        match snap.phase {
            GamePhase::Idle => out.push_str("  [press Enter]"),
            GamePhase::Running => {}
            GamePhase::Paused => out.push_str("  PAUSED"),
            GamePhase::Over => {
                out.push_str("  GAME OVER");
                if let Some(reason) = snap.over_reason {
                    let _ = write!(out, ": {}", reason.message());
                }
                if frame.new_record {
                    out.push_str("  New record!");
                }
            }
        }
        out.push('\n');
        out
    }
}

impl Renderer for TextRenderer {
    fn draw(&mut self, frame: &Frame) {
        self.output = Self::render(frame);
    }
}

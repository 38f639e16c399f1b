//! Rendering interface
//!
//! Renderers receive a read-only `Frame` once per host frame and never
//! mutate game state.

pub mod text;

pub use text::TextRenderer;

use crate::game::Frame;

pub trait Renderer {
    fn draw(&mut self, frame: &Frame);
}

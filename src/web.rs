//! Browser host
//!
//! The page forwards `keydown` codes and calls `frame()` from
//! `requestAnimationFrame`; the returned JSON frame is drawn by the page.

use wasm_bindgen::prelude::*;

use crate::audio::Silent;
use crate::game::Game;
use crate::input::suppresses_default;
use crate::persistence::LocalStorage;
use crate::platform::WebClock;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Grid Snake (web) starting...");
}

#[wasm_bindgen]
pub struct WebGame {
    game: Game<LocalStorage, WebClock, Silent>,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        WebGame {
            game: Game::new(LocalStorage, WebClock, Silent),
        }
    }

    /// Apply a `KeyboardEvent.code`. Returns true when the page should call
    /// `preventDefault`.
    pub fn key_down(&mut self, code: &str) -> bool {
        self.game.handle_key(code);
        suppresses_default(code)
    }

    /// Advance if a tick is due and return the frame as JSON
    pub fn frame(&mut self) -> String {
        self.game.update();
        match serde_json::to_string(&self.game.frame()) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not encode frame: {}", e);
                String::from("null")
            }
        }
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}

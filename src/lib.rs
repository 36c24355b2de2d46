//! Kana Cat core crate.
//!
//! A typing / rhythm mini-game: each stage serves single characters (home-row
//! letters, digits, kana) that the player types as romaji before a per-prompt
//! deadline. Gameplay lives in the sans-IO `game::Game` state machine so it can
//! be driven and tested natively; `web` wraps it with canvas rendering, DOM
//! overlays, Web Audio cues, local storage and real browser timers.

use wasm_bindgen::prelude::*;

pub mod audio;
pub mod catalog;
pub mod effects;
pub mod error;
pub mod game;
pub mod hands;
pub mod matcher;
pub mod rng;
pub mod romaji;
pub mod scorer;
pub mod selector;
pub mod session;
pub mod settings;
pub mod stage;
pub mod storage;
pub mod timer;
mod web;

pub use catalog::Catalog;
pub use error::GameError;
pub use game::{Command, Game, GameState, MissKind, Prompt, Snapshot};
pub use settings::Settings;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

// -----------------------------------------------------------------------------
// Browser entrypoints
// -----------------------------------------------------------------------------

/// Start (or restart) the game. `settings_json` uses the camelCase `Settings`
/// fields; missing or invalid settings fall back to defaults.
#[wasm_bindgen]
pub fn start_game(settings_json: Option<String>) -> Result<(), JsValue> {
    web::start(settings_json.as_deref()).map_err(JsValue::from)
}

#[wasm_bindgen]
pub fn reset_game() {
    web::reset();
}

/// Cancel every pending game timer (call before unloading the page).
#[wasm_bindgen]
pub fn stop_game() {
    web::stop();
}

#[wasm_bindgen]
pub fn set_muted(muted: bool) {
    web::set_muted(muted);
}

#[wasm_bindgen]
pub fn game_snapshot_json() -> Result<String, JsValue> {
    web::snapshot_json().map_err(JsValue::from)
}

pub(crate) fn performance_now() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

//! Doodle Jump core crate.
//!
//! A doodle bounces across platforms scrolling down a 400 × 600 board. The
//! player moves it left/right and jumps; the round ends once it drops below
//! the board. The simulation (`game`, `config`, `input`) is plain Rust and
//! runs on the host; `dom` draws it with positioned `div`s in the browser.

use wasm_bindgen::prelude::*;

pub mod config;
mod dom;
pub mod error;
pub mod game;
pub mod input;
mod logger;

pub use config::GameConfig;
pub use error::GameError;
pub use game::{Doodle, GameEvent, GameState, Motion, Phase, Platform, Snapshot};
pub use input::Command;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logger::init();
}

// -----------------------------------------------------------------------------
// JS entrypoints
// -----------------------------------------------------------------------------

/// Attach the board, score line and start button; the game begins on click.
#[wasm_bindgen]
pub fn mount() -> Result<(), JsValue> {
    dom::mount(GameConfig::default())
}

/// Start immediately with the default board.
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    dom::start(GameConfig::default())
}

/// Like [`mount`], with a JSON object overriding any `GameConfig` fields.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn mount_with_config(json: &str) -> Result<(), JsValue> {
    dom::mount(GameConfig::from_json(json)?)
}

#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_game_with_config(json: &str) -> Result<(), JsValue> {
    dom::start(GameConfig::from_json(json)?)
}

/// Current board state as JSON, for debugging overlays and tests.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn game_snapshot() -> Result<String, JsValue> {
    dom::snapshot_json()
}

#![cfg(target_arch = "wasm32")]
//! Browser bindings for the Cosmic Artifacts effects.
//!
//! JavaScript constructs one `SoundController` and one `CursorEffects` per
//! page and drives them from its own component lifecycle.

use wasm_bindgen::prelude::*;

mod canvas;
mod dom;
mod frame;
mod overlay;
mod sound;
mod storage;
mod webaudio;

pub use overlay::CursorEffects;
pub use sound::SoundController;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("fx-web starting");
    Ok(())
}

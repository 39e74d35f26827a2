use crate::dom::Listener;
use crate::storage::LocalStorageStore;
use crate::webaudio::WebAudio;
use fx_core::audio::{SoundEngine, FIRST_GESTURE_EVENTS};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

type Engine = Rc<RefCell<SoundEngine<WebAudio, LocalStorageStore>>>;

/// Page-wide sound controller. Hand one instance to every UI element that
/// wants to make noise.
#[wasm_bindgen]
pub struct SoundController {
    engine: Engine,
    gesture: Rc<RefCell<Vec<Listener>>>,
}

#[wasm_bindgen]
impl SoundController {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<SoundController, JsValue> {
        let window = web::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let engine: Engine = Rc::new(RefCell::new(SoundEngine::new(
            Box::new(WebAudio::open),
            LocalStorageStore::open(),
            rand::random(),
        )));

        let gesture = Rc::new(RefCell::new(Vec::with_capacity(FIRST_GESTURE_EVENTS.len())));
        for event in FIRST_GESTURE_EVENTS {
            let engine = engine.clone();
            let all = Rc::downgrade(&gesture);
            let listener = Listener::new(&window, event, move |_| {
                if engine.borrow_mut().on_gesture() {
                    log::debug!("[sound] opened on first {event}");
                }
                if let Some(all) = all.upgrade() {
                    for l in all.borrow().iter() {
                        l.detach();
                    }
                }
            })
            .map_err(|e| JsValue::from_str(&format!("{e:#}")))?;
            gesture.borrow_mut().push(listener);
        }

        Ok(Self { engine, gesture })
    }

    #[wasm_bindgen(getter, js_name = isMuted)]
    pub fn is_muted(&self) -> bool {
        self.engine.borrow().is_muted()
    }

    #[wasm_bindgen(js_name = toggleMute)]
    pub fn toggle_mute(&self) {
        self.engine.borrow_mut().toggle_mute();
    }

    /// Sound-toggle button handler.
    #[wasm_bindgen(js_name = pressToggle)]
    pub fn press_toggle(&self) {
        self.engine.borrow_mut().press_toggle();
    }

    #[wasm_bindgen(js_name = playClickSound)]
    pub fn play_click_sound(&self) {
        self.engine.borrow_mut().play_click_sound();
    }

    #[wasm_bindgen(js_name = playHoverSound)]
    pub fn play_hover_sound(&self) {
        self.engine.borrow_mut().play_hover_sound();
    }

    #[wasm_bindgen(js_name = playWhoosh)]
    pub fn play_whoosh(&self) {
        self.engine.borrow_mut().play_whoosh();
    }

    /// Remove the gesture listeners and silence the drone.
    pub fn dispose(&self) {
        self.gesture.borrow_mut().clear();
        self.engine.borrow_mut().shutdown();
    }
}

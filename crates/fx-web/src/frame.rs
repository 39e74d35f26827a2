use anyhow::anyhow;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type Tick = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Self-rescheduling `requestAnimationFrame` loop. Cancelled on drop.
pub struct FrameLoop {
    tick: Tick,
    pending: Rc<Cell<Option<i32>>>,
}

fn request(window: &web::Window, tick: &Closure<dyn FnMut()>) -> Option<i32> {
    match window.request_animation_frame(tick.as_ref().unchecked_ref()) {
        Ok(id) => Some(id),
        Err(e) => {
            log::error!("requestAnimationFrame: {:?}", e);
            None
        }
    }
}

impl FrameLoop {
    pub fn start(mut on_frame: impl FnMut() + 'static) -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow!("no window"))?;
        let tick: Tick = Rc::new(RefCell::new(None));
        let pending = Rc::new(Cell::new(None));

        let tick_weak = Rc::downgrade(&tick);
        let pending_tick = pending.clone();
        let window_tick = window.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            pending_tick.set(None);
            on_frame();
            let Some(tick) = tick_weak.upgrade() else {
                return;
            };
            let next = tick.borrow().as_ref().and_then(|t| request(&window_tick, t));
            pending_tick.set(next);
        }) as Box<dyn FnMut()>));

        let first = tick.borrow().as_ref().and_then(|t| request(&window, t));
        pending.set(first);
        Ok(Self { tick, pending })
    }

    pub fn cancel(&self) {
        if let Some(id) = self.pending.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
        }
        self.tick.borrow_mut().take();
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}

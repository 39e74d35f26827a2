use crate::canvas::CanvasSurface;
use crate::dom::{self, Listener};
use crate::frame::FrameLoop;
use anyhow::anyhow;
use fx_core::{CursorOverlay, DeviceClass};
use glam::Vec2;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

type Overlay = Rc<RefCell<CursorOverlay<CanvasSurface>>>;

/// Everything that exists only while mounted. Dropping it cancels the frame,
/// removes the listeners and takes the canvas out of the page.
struct Mounted {
    canvas: web::HtmlCanvasElement,
    _frames: FrameLoop,
    _listeners: Vec<Listener>,
}

impl Drop for Mounted {
    fn drop(&mut self) {
        self.canvas.remove();
    }
}

fn pointer_position(event: &web::Event) -> Option<Vec2> {
    let m = event.dyn_ref::<web::MouseEvent>()?;
    Some(Vec2::new(m.client_x() as f32, m.client_y() as f32))
}

/// Cursor particle overlay. Disabled on touch-primary devices.
#[wasm_bindgen]
pub struct CursorEffects {
    device: DeviceClass,
    mounted: Option<Mounted>,
}

#[wasm_bindgen]
impl CursorEffects {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<CursorEffects, JsValue> {
        let window = web::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let caps = dom::detect_capabilities(&window);
        let device = DeviceClass::classify(caps);
        log::info!("[cursor] {device:?} device ({caps:?})");
        Ok(Self {
            device,
            mounted: None,
        })
    }

    #[wasm_bindgen(getter, js_name = isMounted)]
    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    pub fn mount(&mut self) -> Result<(), JsValue> {
        if self.mounted.is_some() {
            return Ok(());
        }
        let Some(overlay) = CursorOverlay::enabled_for(self.device, rand::random()) else {
            log::info!("[cursor] disabled on {:?} devices", self.device);
            return Ok(());
        };
        let mounted =
            Self::build(overlay).map_err(|e| JsValue::from_str(&format!("{e:#}")))?;
        self.mounted = Some(mounted);
        log::info!("[cursor] mounted");
        Ok(())
    }

    pub fn unmount(&mut self) {
        if self.mounted.take().is_some() {
            log::info!("[cursor] unmounted");
        }
    }

    fn build(overlay: CursorOverlay<CanvasSurface>) -> anyhow::Result<Mounted> {
        let window = web::window().ok_or_else(|| anyhow!("no window"))?;
        let document = dom::window_document().ok_or_else(|| anyhow!("no document"))?;
        let canvas = dom::create_overlay_canvas(&document)?;
        let surface = match CanvasSurface::new(canvas.clone()) {
            Ok(s) => s,
            Err(e) => {
                canvas.remove();
                return Err(e.into());
            }
        };

        let overlay: Overlay = Rc::new(RefCell::new(overlay));
        {
            let mut o = overlay.borrow_mut();
            o.attach_surface(surface);
            let (w, h) = dom::viewport_size(&window);
            o.resize(w, h);
        }

        let mut listeners = Vec::with_capacity(3);
        let on_resize = overlay.clone();
        let window_resize = window.clone();
        listeners.push(Listener::new(&window, "resize", move |_| {
            let (w, h) = dom::viewport_size(&window_resize);
            on_resize.borrow_mut().resize(w, h);
        })?);
        let on_move = overlay.clone();
        listeners.push(Listener::new(&window, "pointermove", move |ev| {
            if let Some(pos) = pointer_position(&ev) {
                on_move.borrow_mut().on_pointer_move(pos, Instant::now());
            }
        })?);
        let on_click = overlay.clone();
        listeners.push(Listener::new(&window, "click", move |ev| {
            if let Some(pos) = pointer_position(&ev) {
                on_click.borrow_mut().on_pointer_down(pos, Instant::now());
            }
        })?);

        let on_frame = overlay;
        let frames = FrameLoop::start(move || {
            on_frame.borrow_mut().frame(Instant::now());
        })?;

        Ok(Mounted {
            canvas,
            _frames: frames,
            _listeners: listeners,
        })
    }
}

use anyhow::anyhow;
use fx_core::DeviceCapabilities;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

const OVERLAY_STYLE: &str = "position:fixed;inset:0;pointer-events:none;z-index:50;mix-blend-mode:screen";

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Registered event listener, removed from its target on drop.
pub struct Listener {
    target: web::EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl Listener {
    pub fn new(
        target: &web::EventTarget,
        event: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> anyhow::Result<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .map_err(|e| anyhow!("adding {event} listener: {:?}", e))?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }

    /// Stop receiving events but keep the callback alive. Safe to call from
    /// inside the callback itself.
    pub fn detach(&self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        self.detach();
    }
}

fn media_matches(window: &web::Window, query: &str) -> bool {
    window
        .match_media(query)
        .ok()
        .flatten()
        .is_some_and(|mq| mq.matches())
}

pub fn detect_capabilities(window: &web::Window) -> DeviceCapabilities {
    DeviceCapabilities {
        touch_events: js_sys::Reflect::has(window, &"ontouchstart".into()).unwrap_or(false),
        max_touch_points: window.navigator().max_touch_points().max(0) as u32,
        coarse_pointer: media_matches(window, "(pointer: coarse)"),
        hover_none: media_matches(window, "(hover: none)"),
    }
}

/// Viewport size in CSS pixels.
pub fn viewport_size(window: &web::Window) -> (u32, u32) {
    let dim = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0).max(1.0) as u32
    };
    (dim(window.inner_width()), dim(window.inner_height()))
}

/// Full-viewport, pointer-transparent canvas appended to `<body>`.
pub fn create_overlay_canvas(document: &web::Document) -> anyhow::Result<web::HtmlCanvasElement> {
    let canvas = document
        .create_element("canvas")
        .map_err(|e| anyhow!("{:?}", e))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|_| anyhow!("created element is not a canvas"))?;
    canvas
        .set_attribute("style", OVERLAY_STYLE)
        .map_err(|e| anyhow!("{:?}", e))?;
    canvas
        .set_attribute("aria-hidden", "true")
        .map_err(|e| anyhow!("{:?}", e))?;
    let body = document.body().ok_or_else(|| anyhow!("no body"))?;
    body.append_child(&canvas).map_err(|e| anyhow!("{:?}", e))?;
    Ok(canvas)
}

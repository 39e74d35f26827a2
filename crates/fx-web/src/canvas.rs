//! `Surface2d` on a canvas 2D context.

use fx_core::{FxError, Primitive, Surface2d};
use std::f64::consts::TAU;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

pub struct CanvasSurface {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: web::HtmlCanvasElement) -> Result<Self, FxError> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into::<web::CanvasRenderingContext2d>().ok())
            .ok_or(FxError::SurfaceUnavailable)?;
        Ok(Self { canvas, ctx })
    }

    fn circle(&self, x: f32, y: f32, r: f32) {
        self.ctx.begin_path();
        _ = self.ctx.arc(x as f64, y as f64, r.max(0.0) as f64, 0.0, TAU);
    }
}

impl Surface2d for CanvasSurface {
    fn size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn clear(&mut self) {
        let (w, h) = self.size();
        self.ctx.clear_rect(0.0, 0.0, w as f64, h as f64);
    }

    #[allow(deprecated)]
    fn draw(&mut self, primitive: &Primitive) {
        let ctx = &self.ctx;
        ctx.save();
        match *primitive {
            Primitive::Glow {
                center,
                radius,
                color,
                alpha,
            } => {
                ctx.set_global_alpha(alpha as f64);
                let (x, y, r) = (center.x as f64, center.y as f64, radius as f64);
                if let Ok(g) = ctx.create_radial_gradient(x, y, 0.0, x, y, r) {
                    _ = g.add_color_stop(0.0, &color.css());
                    _ = g.add_color_stop(0.4, &color.css_with_alpha(0.5));
                    _ = g.add_color_stop(1.0, "transparent");
                    self.circle(center.x, center.y, radius);
                    ctx.set_fill_style(&JsValue::from(g));
                    ctx.fill();
                }
            }
            Primitive::Core {
                center,
                radius,
                alpha,
            } => {
                ctx.set_global_alpha(alpha as f64);
                self.circle(center.x, center.y, radius);
                ctx.set_fill_style(&JsValue::from_str("white"));
                ctx.fill();
            }
            Primitive::Ring {
                center,
                radius,
                paint,
                line_width,
                shadow,
                shadow_blur,
                alpha,
            } => {
                ctx.set_global_alpha(alpha as f64);
                self.circle(center.x, center.y, radius);
                ctx.set_stroke_style(&JsValue::from_str(&paint.css()));
                ctx.set_line_width(line_width as f64);
                ctx.set_shadow_color(&shadow.css());
                ctx.set_shadow_blur(shadow_blur as f64);
                ctx.stroke();
            }
        }
        ctx.restore();
    }
}

//! Display list for the cursor overlay.
//!
//! The simulation never talks to a drawing API directly. Each frame it is
//! flattened into `Primitive`s which a [`Surface2d`] paints in order.

use crate::constants::*;
use crate::field::CursorField;
use crate::particles::NeonColor;
use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Paint {
    Neon(NeonColor),
    White,
}

impl Paint {
    pub fn css(self) -> String {
        match self {
            Paint::Neon(c) => c.css(),
            Paint::White => "white".to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Primitive {
    /// Radial gradient disc fading from the hue to transparent.
    Glow {
        center: Vec2,
        radius: f32,
        color: NeonColor,
        alpha: f32,
    },
    /// Opaque white particle core.
    Core { center: Vec2, radius: f32, alpha: f32 },
    /// Stroked circle with a shadow halo.
    Ring {
        center: Vec2,
        radius: f32,
        paint: Paint,
        line_width: f32,
        shadow: NeonColor,
        shadow_blur: f32,
        alpha: f32,
    },
}

/// A 2D drawing target sized in device pixels.
pub trait Surface2d {
    fn size(&self) -> (u32, u32);
    fn set_size(&mut self, width: u32, height: u32);
    fn clear(&mut self);
    fn draw(&mut self, primitive: &Primitive);
}

/// Flatten the live set into draw order: particles (glow then core), then
/// ripples (colored ring then white highlight).
pub fn display_list(field: &CursorField, out: &mut Vec<Primitive>) {
    out.clear();
    for p in field.particles() {
        out.push(Primitive::Glow {
            center: p.position,
            radius: p.size * PARTICLE_GLOW_SCALE,
            color: p.color,
            alpha: p.alpha,
        });
        out.push(Primitive::Core {
            center: p.position,
            radius: p.size,
            alpha: p.alpha,
        });
    }
    for r in field.ripples() {
        out.push(Primitive::Ring {
            center: r.center,
            radius: r.radius,
            paint: Paint::Neon(r.color),
            line_width: r.line_width,
            shadow: r.color,
            shadow_blur: RIPPLE_OUTER_BLUR,
            alpha: r.alpha,
        });
        out.push(Primitive::Ring {
            center: r.center,
            radius: r.radius,
            paint: Paint::White,
            line_width: r.line_width * 0.5,
            shadow: r.color,
            shadow_blur: RIPPLE_INNER_BLUR,
            alpha: r.alpha,
        });
    }
}

//! Particle and ripple primitives.
//!
//! Both are transient: they are spawned by pointer input, advanced once per
//! frame and dropped the moment they fail their liveness check.

use crate::constants::*;
use glam::Vec2;
use rand::Rng;

/// The four neon hues used by the cursor effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NeonColor {
    Pink,
    Cyan,
    Magenta,
    Purple,
}

impl NeonColor {
    pub const PALETTE: [NeonColor; 4] = [
        NeonColor::Pink,
        NeonColor::Cyan,
        NeonColor::Magenta,
        NeonColor::Purple,
    ];

    /// Hue, saturation and lightness (degrees, percent, percent).
    pub fn hsl(self) -> (u16, u8, u8) {
        match self {
            NeonColor::Pink => (330, 100, 60),
            NeonColor::Cyan => (185, 100, 55),
            NeonColor::Magenta => (320, 100, 60),
            NeonColor::Purple => (280, 100, 50),
        }
    }

    pub fn css(self) -> String {
        let (h, s, l) = self.hsl();
        format!("hsl({h}, {s}%, {l}%)")
    }

    pub fn css_with_alpha(self, alpha: f32) -> String {
        let (h, s, l) = self.hsl();
        format!("hsla({h}, {s}%, {l}%, {alpha})")
    }

    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::PALETTE[rng.gen_range(0..Self::PALETTE.len())]
    }
}

#[derive(Clone, Debug)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: f32,
    pub color: NeonColor,
    pub alpha: f32,
    pub decay: f32,
}

impl Particle {
    /// Fresh particle at `position` with randomized size, fade rate, drift and hue.
    pub fn spawn<R: Rng>(position: Vec2, rng: &mut R) -> Self {
        let drift = |rng: &mut R| (rng.gen::<f32>() - 0.5) * PARTICLE_SPEED_SPAN;
        Self {
            position,
            velocity: Vec2::new(drift(rng), drift(rng)),
            size: PARTICLE_SIZE_MIN + rng.gen::<f32>() * PARTICLE_SIZE_SPAN,
            color: NeonColor::random(rng),
            alpha: 1.0,
            decay: PARTICLE_DECAY_MIN + rng.gen::<f32>() * PARTICLE_DECAY_SPAN,
        }
    }

    /// Advance one frame. Returns false once the particle is dead.
    #[inline]
    pub fn advance(&mut self) -> bool {
        self.position += self.velocity;
        self.alpha -= self.decay;
        self.size *= PARTICLE_SHRINK;
        self.is_alive()
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alpha > 0.0 && self.size >= PARTICLE_MIN_SIZE
    }
}

#[derive(Clone, Debug)]
pub struct Ripple {
    pub center: Vec2,
    pub radius: f32,
    pub max_radius: f32,
    pub alpha: f32,
    pub color: NeonColor,
    pub line_width: f32,
}

impl Ripple {
    const WAVE_COLORS: [NeonColor; 2] = [NeonColor::Cyan, NeonColor::Pink];

    /// Wave `index` of a click sequence: later waves reach further, start
    /// fainter and draw thinner.
    pub fn wave(center: Vec2, index: usize) -> Self {
        let i = index as f32;
        Self {
            center,
            radius: RIPPLE_START_RADIUS,
            max_radius: RIPPLE_BASE_MAX_RADIUS + i * RIPPLE_MAX_RADIUS_STEP,
            alpha: RIPPLE_BASE_ALPHA - i * RIPPLE_ALPHA_STEP,
            color: Self::WAVE_COLORS[index % Self::WAVE_COLORS.len()],
            line_width: RIPPLE_BASE_LINE_WIDTH - i * RIPPLE_LINE_WIDTH_STEP,
        }
    }

    /// Advance one frame. Returns false once the ripple is done.
    #[inline]
    pub fn advance(&mut self) -> bool {
        self.radius += RIPPLE_GROWTH_PX;
        self.alpha -= RIPPLE_FADE;
        self.is_alive()
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alpha > 0.0 && self.radius < self.max_radius
    }
}

//! Owner object for the cursor overlay: one simulation, at most one surface.

use crate::device::{DeviceClass, EffectBudget};
use crate::field::CursorField;
use crate::render::{display_list, Primitive, Surface2d};
use glam::Vec2;
use instant::Instant;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The field was advanced and painted.
    Rendered,
    /// No surface attached; nothing was advanced.
    Skipped,
}

pub struct CursorOverlay<S> {
    field: CursorField,
    surface: Option<S>,
    scratch: Vec<Primitive>,
}

impl<S: Surface2d> CursorOverlay<S> {
    pub fn new(field: CursorField) -> Self {
        Self {
            field,
            surface: None,
            scratch: Vec::new(),
        }
    }

    pub fn for_device(device: DeviceClass, seed: u64) -> Self {
        Self::with_budget(device.budget(), seed)
    }

    /// The overlay a host should mount, or `None` when the device class
    /// disables it.
    pub fn enabled_for(device: DeviceClass, seed: u64) -> Option<Self> {
        device
            .overlay_enabled()
            .then(|| Self::for_device(device, seed))
    }

    pub fn with_budget(budget: EffectBudget, seed: u64) -> Self {
        Self::new(CursorField::new(budget, seed))
    }

    pub fn field(&self) -> &CursorField {
        &self.field
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn attach_surface(&mut self, surface: S) {
        self.surface = Some(surface);
    }

    pub fn detach_surface(&mut self) -> Option<S> {
        self.surface.take()
    }

    /// Resynchronize the surface to the viewport. Particles keep their
    /// absolute pixel coordinates.
    pub fn resize(&mut self, width: u32, height: u32) {
        if let Some(s) = self.surface.as_mut() {
            s.set_size(width, height);
        }
    }

    pub fn on_pointer_move(&mut self, pos: Vec2, now: Instant) {
        self.field.on_pointer_move(pos, now);
    }

    pub fn on_pointer_down(&mut self, pos: Vec2, now: Instant) {
        self.field.on_pointer_down(pos, now);
    }

    pub fn frame(&mut self, now: Instant) -> FrameOutcome {
        let Some(surface) = self.surface.as_mut() else {
            return FrameOutcome::Skipped;
        };
        surface.clear();
        self.field.step(now);
        display_list(&self.field, &mut self.scratch);
        for p in &self.scratch {
            surface.draw(p);
        }
        FrameOutcome::Rendered
    }
}

//! Device classification.
//!
//! The host reads its input capabilities once and hands them to
//! [`DeviceClass::classify`]. The result is a constructor-time flag: nothing
//! in the engine re-queries it afterwards.

use crate::constants::*;

/// Raw input capabilities as reported by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DeviceCapabilities {
    /// `ontouchstart` is present on the window.
    pub touch_events: bool,
    /// `navigator.maxTouchPoints`.
    pub max_touch_points: u32,
    /// `(pointer: coarse)` matches.
    pub coarse_pointer: bool,
    /// `(hover: none)` matches.
    pub hover_none: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceClass {
    /// Mouse/trackpad primary.
    Pointer,
    /// Touch primary (phones, tablets, most hybrids).
    Touch,
}

impl DeviceClass {
    pub fn classify(caps: DeviceCapabilities) -> Self {
        if caps.touch_events || caps.max_touch_points > 0 || caps.coarse_pointer || caps.hover_none
        {
            DeviceClass::Touch
        } else {
            DeviceClass::Pointer
        }
    }

    pub fn is_touch(self) -> bool {
        matches!(self, DeviceClass::Touch)
    }

    /// Touch-primary devices get no cursor overlay at all.
    pub fn overlay_enabled(self) -> bool {
        !self.is_touch()
    }

    pub fn budget(self) -> EffectBudget {
        match self {
            DeviceClass::Pointer => EffectBudget {
                max_particles: MAX_PARTICLES_POINTER,
                spawn_per_move: SPAWN_PER_MOVE_POINTER,
                burst_count: BURST_COUNT_POINTER,
            },
            DeviceClass::Touch => EffectBudget {
                max_particles: MAX_PARTICLES_TOUCH,
                spawn_per_move: SPAWN_PER_MOVE_TOUCH,
                burst_count: BURST_COUNT_TOUCH,
            },
        }
    }
}

/// Spawn limits for one device class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EffectBudget {
    pub max_particles: usize,
    pub spawn_per_move: usize,
    pub burst_count: usize,
}

impl Default for EffectBudget {
    fn default() -> Self {
        DeviceClass::Pointer.budget()
    }
}

//! Host-independent core of the Cosmic Artifacts effects: the cursor
//! particle/ripple simulation and the procedural sound engine.
//!
//! Platform access goes through three seams: [`render::Surface2d`] for
//! drawing, [`audio::AudioBackend`] for sound and [`prefs::PreferenceStore`]
//! for the persisted mute flag. The web frontend implements all three.

pub mod audio;
pub mod constants;
pub mod device;
pub mod error;
pub mod field;
pub mod overlay;
pub mod particles;
pub mod prefs;
pub mod render;

pub use device::*;
pub use error::{FxError, FxResult};
pub use field::CursorField;
pub use overlay::{CursorOverlay, FrameOutcome};
pub use particles::*;
pub use render::{display_list, Paint, Primitive, Surface2d};

pub mod backend;
pub mod drone;
pub mod engine;
pub mod sfx;
pub mod synth;

pub use backend::*;
pub use drone::Drone;
pub use engine::{FIRST_GESTURE_EVENTS, LiveGraph, Opener, SoundEngine, SoundPhase, SoundState};
pub use sfx::OneShot;

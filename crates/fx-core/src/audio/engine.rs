//! Sound controller state machine.
//!
//! ```text
//! Uninitialized --initialize--> Muted | Unmuted   (by stored preference)
//!               \-------------> Unavailable       (no audio platform)
//! Muted <--toggle_mute--> Unmuted
//! ```
//!
//! The audio platform is opened lazily because browsers only allow it from a
//! user gesture. Everything after that is a no-op when muted or unavailable.

use super::backend::{AudioBackend, Automation, NodeSpec, Param};
use super::drone::{self, Drone};
use super::sfx::{self, OneShot};
use crate::constants::MASTER_RAMP_TIME_CONSTANT;
use crate::error::FxResult;
use crate::prefs::{load_muted, save_muted, PreferenceStore};
use rand::prelude::*;

pub type Opener<B> = Box<dyn FnMut() -> FxResult<B>>;

/// DOM events that count as the first user gesture.
pub const FIRST_GESTURE_EVENTS: [&str; 3] = ["click", "keydown", "touchstart"];

/// The live graph: platform handle, master gain and (when audible) the drone.
pub struct LiveGraph<B: AudioBackend> {
    backend: B,
    master: B::Node,
    drone: Option<Drone<B::Node>>,
}

impl<B: AudioBackend> LiveGraph<B> {
    pub fn master(&self) -> &B::Node {
        &self.master
    }

    pub fn drone(&self) -> Option<&Drone<B::Node>> {
        self.drone.as_ref()
    }

    fn ramp_master(&mut self, target: f32) {
        let now = self.backend.current_time();
        self.backend.automate(
            &self.master,
            Param::Gain,
            Automation::SetTargetAtTime {
                target,
                start: now,
                time_constant: MASTER_RAMP_TIME_CONSTANT,
            },
        );
    }

    fn start_drone<R: Rng>(&mut self, rng: &mut R) {
        if self.drone.is_some() {
            return;
        }
        match drone::start(&mut self.backend, &self.master, rng) {
            Ok(d) => self.drone = Some(d),
            Err(e) => log::warn!("[sound] drone unavailable: {e}"),
        }
    }

    fn stop_drone(&mut self) {
        if let Some(d) = self.drone.take() {
            d.teardown(&mut self.backend);
        }
    }
}

pub enum SoundState<B: AudioBackend> {
    Uninitialized { muted: bool },
    Unavailable { muted: bool },
    Muted(LiveGraph<B>),
    Unmuted(LiveGraph<B>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundPhase {
    Uninitialized,
    Unavailable,
    Muted,
    Unmuted,
}

impl<B: AudioBackend> SoundState<B> {
    pub fn phase(&self) -> SoundPhase {
        match self {
            SoundState::Uninitialized { .. } => SoundPhase::Uninitialized,
            SoundState::Unavailable { .. } => SoundPhase::Unavailable,
            SoundState::Muted(_) => SoundPhase::Muted,
            SoundState::Unmuted(_) => SoundPhase::Unmuted,
        }
    }

    pub fn is_muted(&self) -> bool {
        match self {
            SoundState::Uninitialized { muted } | SoundState::Unavailable { muted } => *muted,
            SoundState::Muted(_) => true,
            SoundState::Unmuted(_) => false,
        }
    }

    pub fn graph(&self) -> Option<&LiveGraph<B>> {
        match self {
            SoundState::Muted(g) | SoundState::Unmuted(g) => Some(g),
            _ => None,
        }
    }
}

pub struct SoundEngine<B: AudioBackend, S: PreferenceStore> {
    state: SoundState<B>,
    opener: Opener<B>,
    store: S,
    rng: StdRng,
}

impl<B: AudioBackend, S: PreferenceStore> SoundEngine<B, S> {
    pub fn new(opener: Opener<B>, store: S, seed: u64) -> Self {
        Self::with_rng(opener, store, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(opener: Opener<B>, store: S, rng: StdRng) -> Self {
        let muted = load_muted(&store);
        Self {
            state: SoundState::Uninitialized { muted },
            opener,
            store,
            rng,
        }
    }

    pub fn state(&self) -> &SoundState<B> {
        &self.state
    }

    pub fn phase(&self) -> SoundPhase {
        self.state.phase()
    }

    pub fn is_muted(&self) -> bool {
        self.state.is_muted()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn drone_active(&self) -> bool {
        self.state.graph().is_some_and(|g| g.drone.is_some())
    }

    /// First-gesture entry point: open the platform, build the master bus and,
    /// when sound is on, start the drone. Idempotent.
    pub fn initialize(&mut self) {
        let SoundState::Uninitialized { muted } = self.state else {
            return;
        };
        self.state = match self.open_graph(muted) {
            Ok(mut graph) => {
                if muted {
                    log::info!("[sound] initialized (muted)");
                    SoundState::Muted(graph)
                } else {
                    graph.start_drone(&mut self.rng);
                    log::info!("[sound] initialized");
                    SoundState::Unmuted(graph)
                }
            }
            Err(e) => {
                log::warn!("[sound] audio disabled: {e}");
                SoundState::Unavailable { muted }
            }
        };
    }

    /// Gesture listener entry point. Returns true only for the gesture that
    /// left the uninitialized state. Any later gesture is a no-op, so the
    /// host drops its listeners after the first one.
    pub fn on_gesture(&mut self) -> bool {
        if self.phase() != SoundPhase::Uninitialized {
            return false;
        }
        self.initialize();
        true
    }

    fn open_graph(&mut self, muted: bool) -> FxResult<LiveGraph<B>> {
        let mut backend = (self.opener)()?;
        let master = backend.create(NodeSpec::Gain {
            gain: if muted { 0.0 } else { 1.0 },
        })?;
        backend.connect_output(&master);
        Ok(LiveGraph {
            backend,
            master,
            drone: None,
        })
    }

    /// Flip and persist the mute preference, initializing first if needed.
    pub fn toggle_mute(&mut self) {
        self.initialize();
        let muted = !self.is_muted();
        save_muted(&mut self.store, muted);

        let placeholder = SoundState::Uninitialized { muted };
        self.state = match std::mem::replace(&mut self.state, placeholder) {
            SoundState::Muted(mut g) => {
                g.ramp_master(1.0);
                g.start_drone(&mut self.rng);
                log::debug!("[sound] unmuted");
                SoundState::Unmuted(g)
            }
            SoundState::Unmuted(mut g) => {
                g.ramp_master(0.0);
                g.stop_drone();
                log::debug!("[sound] muted");
                SoundState::Muted(g)
            }
            SoundState::Uninitialized { .. } | SoundState::Unavailable { .. } => {
                SoundState::Unavailable { muted }
            }
        };
    }

    /// Sound-toggle button: acknowledge with a click before going quiet.
    pub fn press_toggle(&mut self) {
        if !self.is_muted() {
            self.play_click_sound();
        }
        self.toggle_mute();
    }

    /// Scheduled one-shots report their node count and end time; `None` when
    /// silent.
    pub fn play_click_sound(&mut self) -> Option<OneShot> {
        self.one_shot("click", sfx::click::<B, StdRng>)
    }

    pub fn play_hover_sound(&mut self) -> Option<OneShot> {
        self.one_shot("hover", sfx::hover::<B, StdRng>)
    }

    pub fn play_whoosh(&mut self) -> Option<OneShot> {
        self.one_shot("whoosh", sfx::whoosh::<B, StdRng>)
    }

    fn one_shot<F>(&mut self, name: &str, build: F) -> Option<OneShot>
    where
        F: FnOnce(&mut B, &B::Node, &mut StdRng) -> FxResult<OneShot>,
    {
        let SoundState::Unmuted(g) = &mut self.state else {
            return None;
        };
        match build(&mut g.backend, &g.master, &mut self.rng) {
            Ok(shot) => Some(shot),
            Err(e) => {
                log::warn!("[sound] {name}: {e}");
                None
            }
        }
    }

    /// Tear the drone down (host unmount). The preference is left alone.
    pub fn shutdown(&mut self) {
        if let SoundState::Muted(g) | SoundState::Unmuted(g) = &mut self.state {
            g.stop_drone();
        }
    }
}

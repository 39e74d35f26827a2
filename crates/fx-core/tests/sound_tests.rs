// Host-side tests for the sound controller, driven through a recording backend.

mod common;

use common::{failing_node_opener, recording_opener, unavailable_opener, GraphLog};
use fx_core::audio::{
    Automation, OneShot, Param, SoundEngine, SoundPhase, FIRST_GESTURE_EVENTS,
};
use fx_core::prefs::{MemoryStore, PreferenceStore, SOUND_MUTED_KEY};
use std::cell::RefCell;
use std::rc::Rc;

type Engine = SoundEngine<common::RecordingBackend, MemoryStore>;

fn engine(store: MemoryStore) -> (Engine, Rc<RefCell<GraphLog>>) {
    let log = Rc::new(RefCell::new(GraphLog::default()));
    let engine = SoundEngine::new(recording_opener(&log), store, 99);
    (engine, log)
}

fn sound_on() -> MemoryStore {
    MemoryStore::new().with(SOUND_MUTED_KEY, "false")
}

/// (nodes, sources) of the running drone.
fn drone_size(engine: &Engine) -> (usize, usize) {
    let drone = engine
        .state()
        .graph()
        .and_then(|g| g.drone())
        .expect("drone running");
    (drone.node_count(), drone.source_count())
}

fn stored(engine: &Engine) -> Option<String> {
    engine.store().get(SOUND_MUTED_KEY).unwrap()
}

#[test]
fn starts_uninitialized_with_stored_preference() {
    let (muted, log) = engine(MemoryStore::new());
    assert_eq!(muted.phase(), SoundPhase::Uninitialized);
    assert!(muted.is_muted());
    assert_eq!(log.borrow().opened, 0);

    let (audible, _) = engine(sound_on());
    assert!(!audible.is_muted());
}

#[test]
fn initialize_is_idempotent() {
    let (mut e, log) = engine(sound_on());
    e.initialize();
    e.initialize();
    e.initialize();

    let (nodes, sources) = drone_size(&e);
    assert_eq!((nodes, sources), (27, 9));
    let log = log.borrow();
    assert_eq!(log.opened, 1);
    assert_eq!(log.outputs.len(), 1, "one master gain routed to the output");
    assert_eq!(log.count("convolver"), 1, "one drone");
    assert_eq!(log.created.len(), 1 + nodes);
    assert_eq!(log.started.len(), sources);
    assert_eq!(e.phase(), SoundPhase::Unmuted);
    assert!(e.drone_active());
}

#[test]
fn muted_initialize_builds_only_the_master() {
    let (mut e, log) = engine(MemoryStore::new());
    e.initialize();
    assert_eq!(e.phase(), SoundPhase::Muted);
    assert!(!e.drone_active());
    assert_eq!(log.borrow().created, vec!["gain"]);
}

#[test]
fn mute_cycles_do_not_leak_nodes() {
    let (mut e, log) = engine(sound_on());
    e.initialize();

    e.toggle_mute();
    let live_after_first_mute = log.borrow().live_nodes();
    assert_eq!(live_after_first_mute, 1);
    assert_eq!(log.borrow().running_sources(), 0);

    e.toggle_mute();
    let (nodes, _) = drone_size(&e);
    assert_eq!(log.borrow().live_nodes(), 1 + nodes);
    e.toggle_mute();

    assert_eq!(log.borrow().live_nodes(), live_after_first_mute);
    assert_eq!(log.borrow().running_sources(), 0);
    assert_eq!(log.borrow().count("convolver"), 2);
}

#[test]
fn toggle_ramps_master_and_persists() {
    let (mut e, log) = engine(sound_on());
    e.initialize();
    log.borrow_mut().time = 2.5;

    e.toggle_mute();
    assert!(e.is_muted());
    assert_eq!(stored(&e).as_deref(), Some("true"));
    let master = *e.state().graph().unwrap().master();
    assert_eq!(
        log.borrow().automations.last(),
        Some(&(
            master,
            Param::Gain,
            Automation::SetTargetAtTime {
                target: 0.0,
                start: 2.5,
                time_constant: 0.1
            }
        ))
    );

    e.toggle_mute();
    assert!(!e.is_muted());
    assert_eq!(stored(&e).as_deref(), Some("false"));
    let ramps: Vec<f32> = log
        .borrow()
        .automations
        .iter()
        .filter_map(|(node, _, ev)| match ev {
            Automation::SetTargetAtTime { target, .. } if *node == master => Some(*target),
            _ => None,
        })
        .collect();
    assert_eq!(ramps, vec![0.0, 1.0]);
}

#[test]
fn toggle_before_any_gesture_initializes_first() {
    let (mut e, log) = engine(MemoryStore::new());
    e.toggle_mute();
    assert_eq!(e.phase(), SoundPhase::Unmuted);
    assert!(e.drone_active());
    assert_eq!(log.borrow().opened, 1);
    assert_eq!(stored(&e).as_deref(), Some("false"));
}

#[test]
fn one_shots_are_silent_unless_unmuted() {
    let (mut e, log) = engine(MemoryStore::new());
    e.play_click_sound();
    e.play_hover_sound();
    e.play_whoosh();
    assert_eq!(log.borrow().opened, 0, "sounds never open the platform");

    e.initialize();
    let before = log.borrow().created.len();
    assert_eq!(e.play_click_sound(), None);
    assert_eq!(e.play_hover_sound(), None);
    assert_eq!(e.play_whoosh(), None);
    assert_eq!(log.borrow().created.len(), before);
}

#[test]
fn one_shots_schedule_their_own_stop() {
    let (mut e, log) = engine(sound_on());
    e.initialize();
    let cases: [(fn(&mut Engine) -> Option<OneShot>, usize, f64); 3] = [
        (Engine::play_click_sound, 11, 0.1),
        (Engine::play_hover_sound, 3, 0.15),
        (Engine::play_whoosh, 5, 0.6),
    ];
    for (play, nodes, length) in cases {
        let now = 10.0;
        {
            let mut l = log.borrow_mut();
            l.time = now;
            l.started.clear();
            l.stopped.clear();
        }
        let before = log.borrow().created.len();
        let shot = play(&mut e).expect("unmuted one-shot is scheduled");
        assert_eq!(shot.nodes, nodes);
        assert!((shot.ends_at - (now + length)).abs() < 1e-9);

        let l = log.borrow();
        assert_eq!(l.created.len() - before, nodes);
        assert!(!l.stopped.is_empty());
        assert_eq!(l.running_sources(), 0);
        for (_, when) in &l.stopped {
            assert!(*when > now && *when <= now + length + 1e-9, "stop at {when}");
        }
    }
}

#[test]
fn click_oscillators_sweep_down() {
    let (mut e, log) = engine(sound_on());
    e.initialize();
    let first = log.borrow().created.len();
    e.play_click_sound();

    let l = log.borrow();
    let sweeps: Vec<(f32, f32)> = (first..l.created.len())
        .filter_map(|id| {
            let ramps: Vec<f32> = l
                .automations
                .iter()
                .filter(|(n, p, _)| *n == id && *p == Param::Frequency)
                .map(|(_, _, ev)| match ev {
                    Automation::SetValueAtTime { value, .. }
                    | Automation::ExponentialRampTo { value, .. } => *value,
                    other => panic!("unexpected {other:?}"),
                })
                .collect();
            (ramps.len() == 2).then(|| (ramps[0], ramps[1]))
        })
        .collect();
    assert_eq!(sweeps, vec![(800.0, 200.0), (1200.0, 100.0)]);
}

#[test]
fn press_toggle_clicks_before_muting() {
    let (mut e, log) = engine(sound_on());
    e.initialize();
    let before = log.borrow().created.len();

    e.press_toggle();
    assert!(e.is_muted());
    assert_eq!(log.borrow().created.len() - before, 11);
    // the master fade comes after the click envelope
    assert!(matches!(
        log.borrow().automations.last(),
        Some((_, Param::Gain, Automation::SetTargetAtTime { target, .. })) if *target == 0.0
    ));

    // pressing again unmutes without a click
    let before = log.borrow().created.len();
    e.press_toggle();
    assert!(!e.is_muted());
    assert_eq!(log.borrow().created.len() - before, drone_size(&e).0);
}

#[test]
fn shutdown_releases_the_drone_but_keeps_the_preference() {
    let (mut e, log) = engine(sound_on());
    e.initialize();
    e.shutdown();
    assert!(!e.drone_active());
    assert_eq!(log.borrow().running_sources(), 0);
    assert_eq!(log.borrow().live_nodes(), 1);
    assert_eq!(stored(&e).as_deref(), Some("false"));
    assert!(!e.is_muted());
}

#[test]
fn missing_platform_degrades_to_unavailable() {
    let mut e: Engine = SoundEngine::new(unavailable_opener(), MemoryStore::new(), 1);
    e.initialize();
    assert_eq!(e.phase(), SoundPhase::Unavailable);
    assert!(e.is_muted());

    e.toggle_mute();
    assert_eq!(e.phase(), SoundPhase::Unavailable);
    assert!(!e.is_muted());
    assert_eq!(stored(&e).as_deref(), Some("false"));

    e.play_click_sound();
    e.play_hover_sound();
    e.play_whoosh();
    e.press_toggle();
    e.shutdown();
    assert!(e.is_muted());
}

#[test]
fn drone_failure_leaves_master_playing_and_nothing_dangling() {
    let log = Rc::new(RefCell::new(GraphLog::default()));
    let mut e: Engine = SoundEngine::new(
        failing_node_opener(&log, Some("convolver")),
        sound_on(),
        5,
    );
    e.initialize();
    assert_eq!(e.phase(), SoundPhase::Unmuted);
    assert!(!e.drone_active());
    assert_eq!(log.borrow().live_nodes(), 1);
    assert_eq!(log.borrow().running_sources(), 0);

    // one-shots still work without the drone
    let before = log.borrow().created.len();
    e.play_hover_sound();
    assert_eq!(log.borrow().created.len() - before, 3);
}

#[test]
fn read_only_storage_still_toggles() {
    let (mut e, _) = engine(MemoryStore::read_only());
    e.toggle_mute();
    assert!(!e.is_muted());
    e.toggle_mute();
    assert!(e.is_muted());
}

#[test]
fn only_the_first_gesture_opens_audio() {
    assert_eq!(FIRST_GESTURE_EVENTS, ["click", "keydown", "touchstart"]);

    let (mut e, log) = engine(sound_on());
    assert!(e.on_gesture());
    assert_eq!(e.phase(), SoundPhase::Unmuted);
    for _ in FIRST_GESTURE_EVENTS {
        assert!(!e.on_gesture());
    }
    assert_eq!(log.borrow().opened, 1);
    assert_eq!(log.borrow().count("convolver"), 1);
}

#[test]
fn gesture_after_toggle_does_not_reopen() {
    let (mut e, log) = engine(MemoryStore::new());
    e.toggle_mute();
    assert!(!e.on_gesture());
    assert_eq!(log.borrow().opened, 1);
}

#[test]
fn gesture_on_missing_platform_is_still_consumed() {
    let mut e: Engine = SoundEngine::new(unavailable_opener(), MemoryStore::new(), 3);
    assert!(e.on_gesture());
    assert_eq!(e.phase(), SoundPhase::Unavailable);
    assert!(!e.on_gesture());
}

// Host-side tests for the overlay frame loop and its display list.

mod common;

use common::RecordingSurface;
use fx_core::{
    CursorOverlay, DeviceCapabilities, DeviceClass, FrameOutcome, Paint, Primitive, Surface2d,
};
use glam::Vec2;
use instant::Instant;
use std::time::Duration;

fn mounted(width: u32, height: u32) -> CursorOverlay<RecordingSurface> {
    let mut overlay = CursorOverlay::for_device(DeviceClass::Pointer, 21);
    overlay.attach_surface(RecordingSurface::sized(width, height));
    overlay
}

#[test]
fn frame_without_surface_is_skipped_and_does_not_advance() {
    let mut overlay: CursorOverlay<RecordingSurface> =
        CursorOverlay::for_device(DeviceClass::Pointer, 1);
    let t0 = Instant::now();
    overlay.on_pointer_down(Vec2::new(10.0, 10.0), t0);

    assert_eq!(overlay.frame(t0), FrameOutcome::Skipped);
    assert_eq!(overlay.field().particles().len(), 15);
    assert!(overlay.field().particles().iter().all(|p| p.alpha == 1.0));
    assert_eq!(overlay.field().pending_ripples().len(), 3);
}

#[test]
fn frame_clears_then_draws_two_primitives_per_element() {
    let mut overlay = mounted(800, 600);
    let t0 = Instant::now();
    overlay.on_pointer_down(Vec2::new(300.0, 200.0), t0);

    assert_eq!(overlay.frame(t0), FrameOutcome::Rendered);
    let surface = overlay.surface().unwrap();
    assert_eq!(surface.clears, 1);

    let field = overlay.field();
    assert_eq!(field.ripples().len(), 1);
    let expected = 2 * field.particles().len() + 2 * field.ripples().len();
    assert_eq!(surface.drawn.len(), expected);

    // particles first (glow, core), ripples last (neon, white)
    assert!(matches!(surface.drawn[0], Primitive::Glow { .. }));
    assert!(matches!(surface.drawn[1], Primitive::Core { .. }));
    let n = surface.drawn.len();
    match (surface.drawn[n - 2], surface.drawn[n - 1]) {
        (
            Primitive::Ring {
                paint: Paint::Neon(_),
                shadow_blur: outer,
                line_width: wide,
                ..
            },
            Primitive::Ring {
                paint: Paint::White,
                shadow_blur: inner,
                line_width: narrow,
                ..
            },
        ) => {
            assert_eq!((outer, inner), (20.0, 10.0));
            assert!((narrow - wide * 0.5).abs() < 1e-6);
        }
        other => panic!("unexpected ripple primitives: {other:?}"),
    }
}

#[test]
fn glow_is_three_times_the_core() {
    let mut overlay = mounted(800, 600);
    let t0 = Instant::now();
    overlay.on_pointer_move(Vec2::new(50.0, 50.0), t0);
    overlay.frame(t0);
    let drawn = &overlay.surface().unwrap().drawn;
    for pair in drawn.chunks(2) {
        match (pair[0], pair[1]) {
            (Primitive::Glow { radius: g, .. }, Primitive::Core { radius: c, .. }) => {
                assert!((g - 3.0 * c).abs() < 1e-4);
            }
            other => panic!("unexpected particle primitives: {other:?}"),
        }
    }
}

#[test]
fn nothing_drawn_is_dead() {
    let mut overlay = mounted(1024, 768);
    let t0 = Instant::now();
    overlay.on_pointer_down(Vec2::new(512.0, 384.0), t0);
    for frame in 0..120u64 {
        let now = t0 + Duration::from_millis(16 * frame);
        overlay.frame(now);
        for prim in &overlay.surface().unwrap().drawn {
            let alpha = match prim {
                Primitive::Glow { alpha, .. }
                | Primitive::Core { alpha, .. }
                | Primitive::Ring { alpha, .. } => *alpha,
            };
            assert!(alpha > 0.0, "frame {frame}: {prim:?}");
        }
    }
    assert!(overlay.surface().unwrap().drawn.is_empty());
}

#[test]
fn resize_keeps_absolute_positions() {
    let mut overlay = mounted(800, 600);
    let t0 = Instant::now();
    overlay.on_pointer_down(Vec2::new(700.0, 500.0), t0);
    let before: Vec<Vec2> = overlay.field().particles().iter().map(|p| p.position).collect();

    overlay.resize(1920, 1080);
    assert_eq!(overlay.surface().unwrap().size(), (1920, 1080));
    let after: Vec<Vec2> = overlay.field().particles().iter().map(|p| p.position).collect();
    assert_eq!(before, after);
}

#[test]
fn detach_stops_rendering() {
    let mut overlay = mounted(800, 600);
    let t0 = Instant::now();
    assert_eq!(overlay.frame(t0), FrameOutcome::Rendered);
    let surface = overlay.detach_surface().unwrap();
    assert_eq!(surface.clears, 1);
    assert_eq!(overlay.frame(t0), FrameOutcome::Skipped);
    assert!(overlay.surface().is_none());
}

#[test]
fn touch_devices_get_no_overlay() {
    let phone = DeviceClass::classify(DeviceCapabilities {
        touch_events: true,
        max_touch_points: 5,
        ..Default::default()
    });
    assert!(CursorOverlay::<RecordingSurface>::enabled_for(phone, 1).is_none());
    assert!(CursorOverlay::<RecordingSurface>::enabled_for(DeviceClass::Touch, 2).is_none());

    let desktop = DeviceClass::classify(DeviceCapabilities::default());
    let overlay = CursorOverlay::<RecordingSurface>::enabled_for(desktop, 3)
        .expect("pointer devices mount the overlay");
    assert_eq!(overlay.field().budget(), DeviceClass::Pointer.budget());
}

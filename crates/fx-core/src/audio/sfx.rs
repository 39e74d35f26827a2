//! One-shot UI sounds.
//!
//! Every call builds a fresh sub-graph hanging off the master gain and
//! schedules its own stop; nothing is pooled. Releasing the stopped nodes is
//! left to the platform.

use super::backend::{AudioBackend, Automation, FilterKind, NodeSpec, OscShape, Param};
use super::synth::{tanh_curve, white_noise};
use crate::constants::*;
use crate::error::FxResult;
use rand::Rng;

// Biquad default when the sound design does not care about resonance.
const FLAT_Q: f32 = 1.0;

/// Summary of a scheduled one-shot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OneShot {
    pub nodes: usize,
    pub ends_at: f64,
}

struct Patch<'b, B: AudioBackend> {
    backend: &'b mut B,
    nodes: usize,
}

impl<'b, B: AudioBackend> Patch<'b, B> {
    fn new(backend: &'b mut B) -> Self {
        Self { backend, nodes: 0 }
    }

    fn node(&mut self, spec: NodeSpec<'_>) -> FxResult<B::Node> {
        let n = self.backend.create(spec)?;
        self.nodes += 1;
        Ok(n)
    }

    fn envelope(&mut self, node: &B::Node, param: Param, events: &[Automation]) {
        for ev in events {
            self.backend.automate(node, param, *ev);
        }
    }

    fn play(&mut self, source: &B::Node, from: f64, until: f64) {
        self.backend.start(source, from);
        self.backend.stop(source, until);
    }
}

/// Layered percussive hit: two falling oscillators, high-passed and
/// soft-clipped, plus three short glitch blips.
pub fn click<B: AudioBackend, R: Rng>(
    backend: &mut B,
    master: &B::Node,
    rng: &mut R,
) -> FxResult<OneShot> {
    let now = backend.current_time();
    let end = now + CLICK_LENGTH_SEC;
    let mut p = Patch::new(backend);

    let out = p.node(NodeSpec::Gain { gain: CLICK_LEVEL })?;
    p.envelope(
        &out,
        Param::Gain,
        &[
            Automation::SetValueAtTime {
                value: CLICK_LEVEL,
                at: now,
            },
            Automation::ExponentialRampTo {
                value: ENVELOPE_FLOOR,
                at: end,
            },
        ],
    );
    p.backend.connect(&out, master);

    let sweeps = [
        (OscShape::Square, 800.0, 200.0, 0.05),
        (OscShape::Sawtooth, 1200.0, 100.0, 0.08),
    ];
    let filter = p.node(NodeSpec::Filter {
        kind: FilterKind::Highpass,
        frequency: CLICK_HIGHPASS_HZ,
        q: FLAT_Q,
    })?;
    let curve = tanh_curve(CLICK_CURVE_LEN, CLICK_DRIVE);
    let shaper = p.node(NodeSpec::WaveShaper { curve: &curve })?;
    p.backend.connect(&filter, &shaper);
    p.backend.connect(&shaper, &out);

    for (shape, from_hz, to_hz, fall) in sweeps {
        let osc = p.node(NodeSpec::Oscillator {
            shape,
            frequency: from_hz,
        })?;
        p.envelope(
            &osc,
            Param::Frequency,
            &[
                Automation::SetValueAtTime {
                    value: from_hz,
                    at: now,
                },
                Automation::ExponentialRampTo {
                    value: to_hz,
                    at: now + fall,
                },
            ],
        );
        p.backend.connect(&osc, &filter);
        p.play(&osc, now, end);
    }

    for _ in 0..GLITCH_COUNT {
        let osc = p.node(NodeSpec::Oscillator {
            shape: OscShape::Square,
            frequency: GLITCH_FREQ_MIN + rng.gen::<f32>() * GLITCH_FREQ_SPAN,
        })?;
        let gain = p.node(NodeSpec::Gain { gain: 0.0 })?;
        let t = now + rng.gen::<f64>() * GLITCH_WINDOW_SEC;
        p.envelope(
            &gain,
            Param::Gain,
            &[
                Automation::SetValueAtTime { value: 0.0, at: t },
                Automation::LinearRampTo {
                    value: GLITCH_LEVEL,
                    at: t + 0.01,
                },
                Automation::LinearRampTo {
                    value: 0.0,
                    at: t + 0.02,
                },
            ],
        );
        p.backend.connect(&osc, &gain);
        p.backend.connect(&gain, master);
        p.play(&osc, t, t + 0.03);
    }

    Ok(OneShot {
        nodes: p.nodes,
        ends_at: end,
    })
}

/// Short band-passed sine chirp sweeping down from 3-4 kHz.
pub fn hover<B: AudioBackend, R: Rng>(
    backend: &mut B,
    master: &B::Node,
    rng: &mut R,
) -> FxResult<OneShot> {
    let now = backend.current_time();
    let end = now + HOVER_LENGTH_SEC;
    let mut p = Patch::new(backend);

    let out = p.node(NodeSpec::Gain { gain: 0.0 })?;
    p.envelope(
        &out,
        Param::Gain,
        &[
            Automation::SetValueAtTime { value: 0.0, at: now },
            Automation::LinearRampTo {
                value: HOVER_LEVEL,
                at: now + HOVER_ATTACK_SEC,
            },
            Automation::LinearRampTo { value: 0.0, at: end },
        ],
    );
    p.backend.connect(&out, master);

    let from_hz = 3000.0 + rng.gen::<f32>() * 1000.0;
    let to_hz = 2000.0 + rng.gen::<f32>() * 500.0;
    let osc = p.node(NodeSpec::Oscillator {
        shape: OscShape::Sine,
        frequency: from_hz,
    })?;
    p.envelope(
        &osc,
        Param::Frequency,
        &[
            Automation::SetValueAtTime {
                value: from_hz,
                at: now,
            },
            Automation::LinearRampTo {
                value: to_hz,
                at: end,
            },
        ],
    );
    let filter = p.node(NodeSpec::Filter {
        kind: FilterKind::Bandpass,
        frequency: HOVER_BANDPASS_HZ,
        q: HOVER_BANDPASS_Q,
    })?;
    p.backend.connect(&osc, &filter);
    p.backend.connect(&filter, &out);
    p.play(&osc, now, end);

    Ok(OneShot {
        nodes: p.nodes,
        ends_at: end,
    })
}

/// Swept noise burst over a falling sub sine.
pub fn whoosh<B: AudioBackend, R: Rng>(
    backend: &mut B,
    master: &B::Node,
    rng: &mut R,
) -> FxResult<OneShot> {
    let now = backend.current_time();
    let end = now + WHOOSH_LENGTH_SEC;
    let sr = backend.sample_rate();
    let mut p = Patch::new(backend);

    let out = p.node(NodeSpec::Gain { gain: 0.0 })?;
    p.envelope(
        &out,
        Param::Gain,
        &[
            Automation::SetValueAtTime { value: 0.0, at: now },
            Automation::LinearRampTo {
                value: WHOOSH_LEVEL,
                at: now + WHOOSH_ATTACK_SEC,
            },
            Automation::ExponentialRampTo {
                value: ENVELOPE_FLOOR,
                at: end,
            },
        ],
    );
    p.backend.connect(&out, master);

    let noise_buf = white_noise(sr, WHOOSH_LENGTH_SEC as f32, rng);
    let noise = p.node(NodeSpec::BufferSource {
        buffer: &noise_buf,
        looping: false,
    })?;
    let [lo, peak, tail] = WHOOSH_SWEEP_HZ;
    let filter = p.node(NodeSpec::Filter {
        kind: FilterKind::Bandpass,
        frequency: lo,
        q: WHOOSH_FILTER_Q,
    })?;
    p.envelope(
        &filter,
        Param::Frequency,
        &[
            Automation::SetValueAtTime { value: lo, at: now },
            Automation::ExponentialRampTo {
                value: peak,
                at: now + WHOOSH_LENGTH_SEC * WHOOSH_SWEEP_PEAK,
            },
            Automation::ExponentialRampTo {
                value: tail,
                at: end,
            },
        ],
    );
    p.backend.connect(&noise, &filter);
    p.backend.connect(&filter, &out);

    let [sub_from, sub_to] = WHOOSH_SUB_HZ;
    let sub = p.node(NodeSpec::Oscillator {
        shape: OscShape::Sine,
        frequency: sub_from,
    })?;
    p.envelope(
        &sub,
        Param::Frequency,
        &[
            Automation::SetValueAtTime {
                value: sub_from,
                at: now,
            },
            Automation::LinearRampTo {
                value: sub_to,
                at: end,
            },
        ],
    );
    let sub_gain = p.node(NodeSpec::Gain { gain: 0.0 })?;
    p.envelope(
        &sub_gain,
        Param::Gain,
        &[
            Automation::SetValueAtTime { value: 0.0, at: now },
            Automation::LinearRampTo {
                value: WHOOSH_SUB_LEVEL,
                at: now + WHOOSH_SUB_ATTACK_SEC,
            },
            Automation::ExponentialRampTo {
                value: ENVELOPE_FLOOR,
                at: end,
            },
        ],
    );
    p.backend.connect(&sub, &sub_gain);
    p.backend.connect(&sub_gain, &out);

    p.play(&noise, now, end);
    p.play(&sub, now, end);

    Ok(OneShot {
        nodes: p.nodes,
        ends_at: end,
    })
}

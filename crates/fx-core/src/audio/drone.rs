//! Ambient drone sub-graph.
//!
//! ```text
//! osc_i (+ lfo_i -> depth_i -> osc_i.frequency) -> lowpass_i -> level_i -+-> dry ----+-> drone -> master
//! noise -> bandpass -> noise_gain ----------------------------------------+-> reverb -> reverb_gain -+
//! ```

use super::backend::{AudioBackend, FilterKind, NodeSpec, OscShape, Param};
use super::synth::{reverb_impulse, white_noise};
use crate::constants::*;
use crate::error::FxResult;
use rand::Rng;

pub struct Drone<N> {
    /// Everything that has to be `stop`ped (oscillators, LFOs, noise).
    sources: Vec<N>,
    /// Every node of the sub-graph, sources included, in creation order.
    nodes: Vec<N>,
}

impl<N: Clone> Drone<N> {
    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Stop every source and disconnect every node.
    pub fn teardown<B: AudioBackend<Node = N>>(self, backend: &mut B) {
        let now = backend.current_time();
        for s in &self.sources {
            backend.stop(s, now);
        }
        for n in &self.nodes {
            backend.disconnect(n);
        }
        log::debug!(
            "[drone] stopped {} sources, released {} nodes",
            self.sources.len(),
            self.nodes.len()
        );
    }
}

struct Builder<'b, B: AudioBackend> {
    backend: &'b mut B,
    sources: Vec<B::Node>,
    nodes: Vec<B::Node>,
}

impl<'b, B: AudioBackend> Builder<'b, B> {
    fn node(&mut self, spec: NodeSpec<'_>) -> FxResult<B::Node> {
        let n = self.backend.create(spec)?;
        self.nodes.push(n.clone());
        Ok(n)
    }

    fn source(&mut self, spec: NodeSpec<'_>) -> FxResult<B::Node> {
        let n = self.node(spec)?;
        self.sources.push(n.clone());
        Ok(n)
    }

    /// Undo a half-built graph.
    fn abandon(self) {
        Drone {
            sources: self.sources,
            nodes: self.nodes,
        }
        .teardown(self.backend);
    }
}

/// Build and start the drone, routed into `master`.
pub fn start<B: AudioBackend, R: Rng>(
    backend: &mut B,
    master: &B::Node,
    rng: &mut R,
) -> FxResult<Drone<B::Node>> {
    let mut b = Builder {
        backend,
        sources: Vec::new(),
        nodes: Vec::new(),
    };
    match wire(&mut b, master, rng) {
        Ok(()) => {
            let when = b.backend.current_time();
            for s in &b.sources {
                b.backend.start(s, when);
            }
            log::debug!(
                "[drone] started {} sources across {} nodes",
                b.sources.len(),
                b.nodes.len()
            );
            Ok(Drone {
                sources: b.sources,
                nodes: b.nodes,
            })
        }
        Err(e) => {
            b.abandon();
            Err(e)
        }
    }
}

fn wire<B: AudioBackend, R: Rng>(
    b: &mut Builder<'_, B>,
    master: &B::Node,
    rng: &mut R,
) -> FxResult<()> {
    let sr = b.backend.sample_rate();

    let drone = b.node(NodeSpec::Gain { gain: DRONE_GAIN })?;
    b.backend.connect(&drone, master);

    let impulse = reverb_impulse(sr);
    let reverb = b.node(NodeSpec::Convolver { impulse: &impulse })?;
    let reverb_gain = b.node(NodeSpec::Gain {
        gain: DRONE_REVERB_GAIN,
    })?;
    b.backend.connect(&reverb, &reverb_gain);
    b.backend.connect(&reverb_gain, &drone);

    let dry = b.node(NodeSpec::Gain {
        gain: DRONE_DRY_GAIN,
    })?;
    b.backend.connect(&dry, &drone);

    for (i, &freq) in DRONE_FREQUENCIES.iter().enumerate() {
        let fi = i as f32;
        let osc = b.source(NodeSpec::Oscillator {
            shape: OscShape::Sine,
            frequency: freq,
        })?;
        let lfo = b.source(NodeSpec::Oscillator {
            shape: OscShape::Sine,
            frequency: DRONE_LFO_BASE_HZ + fi * DRONE_LFO_STEP_HZ,
        })?;
        let depth = b.node(NodeSpec::Gain {
            gain: freq * DRONE_LFO_DEPTH,
        })?;
        b.backend.connect(&lfo, &depth);
        b.backend.connect_param(&depth, &osc, Param::Frequency);

        let filter = b.node(NodeSpec::Filter {
            kind: FilterKind::Lowpass,
            frequency: DRONE_FILTER_BASE_HZ + fi * DRONE_FILTER_STEP_HZ,
            q: DRONE_FILTER_Q,
        })?;
        let level = b.node(NodeSpec::Gain {
            gain: DRONE_VOICE_LEVEL / (fi + 1.0),
        })?;
        b.backend.connect(&osc, &filter);
        b.backend.connect(&filter, &level);
        b.backend.connect(&level, &dry);
        b.backend.connect(&level, &reverb);
    }

    let noise_buf = white_noise(sr, DRONE_NOISE_SECONDS, rng);
    let noise = b.source(NodeSpec::BufferSource {
        buffer: &noise_buf,
        looping: true,
    })?;
    let noise_filter = b.node(NodeSpec::Filter {
        kind: FilterKind::Bandpass,
        frequency: DRONE_NOISE_FILTER_HZ,
        q: DRONE_NOISE_FILTER_Q,
    })?;
    let noise_gain = b.node(NodeSpec::Gain {
        gain: DRONE_NOISE_GAIN,
    })?;
    b.backend.connect(&noise, &noise_filter);
    b.backend.connect(&noise_filter, &noise_gain);
    b.backend.connect(&noise_gain, &dry);
    b.backend.connect(&noise_gain, &reverb);
    Ok(())
}

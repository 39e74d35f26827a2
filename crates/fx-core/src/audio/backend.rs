//! Audio platform seam.
//!
//! Graphs are described in terms of the WebAudio node model so the browser
//! implementation is a thin mapping, while tests can record every call.

use crate::error::FxResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OscShape {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterKind {
    Lowpass,
    Highpass,
    Bandpass,
}

/// Planar sample data for impulse responses and noise sources.
#[derive(Clone, Debug, PartialEq)]
pub struct SampleBuffer {
    pub sample_rate: f32,
    pub channels: Vec<Vec<f32>>,
}

impl SampleBuffer {
    pub fn frames(&self) -> usize {
        self.channels.first().map_or(0, |c| c.len())
    }
}

/// What to build, with initial parameter values.
#[derive(Clone, Copy, Debug)]
pub enum NodeSpec<'a> {
    Gain {
        gain: f32,
    },
    Oscillator {
        shape: OscShape,
        frequency: f32,
    },
    Filter {
        kind: FilterKind,
        frequency: f32,
        q: f32,
    },
    WaveShaper {
        curve: &'a [f32],
    },
    Convolver {
        impulse: &'a SampleBuffer,
    },
    BufferSource {
        buffer: &'a SampleBuffer,
        looping: bool,
    },
}

impl NodeSpec<'_> {
    pub fn kind(&self) -> &'static str {
        match self {
            NodeSpec::Gain { .. } => "gain",
            NodeSpec::Oscillator { .. } => "oscillator",
            NodeSpec::Filter { .. } => "filter",
            NodeSpec::WaveShaper { .. } => "waveshaper",
            NodeSpec::Convolver { .. } => "convolver",
            NodeSpec::BufferSource { .. } => "buffer source",
        }
    }
}

/// Automatable parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Param {
    Gain,
    Frequency,
    Q,
}

/// One scheduled parameter event on the audio clock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Automation {
    SetValueAtTime { value: f32, at: f64 },
    LinearRampTo { value: f32, at: f64 },
    ExponentialRampTo { value: f32, at: f64 },
    SetTargetAtTime {
        target: f32,
        start: f64,
        time_constant: f64,
    },
}

pub trait AudioBackend {
    type Node: Clone;

    /// Audio clock in seconds.
    fn current_time(&self) -> f64;
    fn sample_rate(&self) -> f32;

    fn create(&mut self, spec: NodeSpec<'_>) -> FxResult<Self::Node>;
    fn connect(&mut self, from: &Self::Node, to: &Self::Node);
    /// Route a node's output into another node's parameter (modulation).
    fn connect_param(&mut self, from: &Self::Node, to: &Self::Node, param: Param);
    /// Route a node to the platform output.
    fn connect_output(&mut self, from: &Self::Node);
    fn disconnect(&mut self, node: &Self::Node);
    fn automate(&mut self, node: &Self::Node, param: Param, event: Automation);
    /// Sources only (oscillators, buffer sources).
    fn start(&mut self, node: &Self::Node, when: f64);
    fn stop(&mut self, node: &Self::Node, when: f64);
}

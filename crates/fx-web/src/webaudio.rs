//! `AudioBackend` on a WebAudio `AudioContext`.

use fx_core::audio::{
    AudioBackend, Automation, FilterKind, NodeSpec, OscShape, Param, SampleBuffer,
};
use fx_core::{FxError, FxResult};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

#[derive(Clone)]
pub enum WebNode {
    Gain(web::GainNode),
    Oscillator(web::OscillatorNode),
    Filter(web::BiquadFilterNode),
    Shaper(web::WaveShaperNode),
    Convolver(web::ConvolverNode),
    Source(web::AudioBufferSourceNode),
}

impl WebNode {
    fn node(&self) -> &web::AudioNode {
        match self {
            WebNode::Gain(n) => n,
            WebNode::Oscillator(n) => n,
            WebNode::Filter(n) => n,
            WebNode::Shaper(n) => n,
            WebNode::Convolver(n) => n,
            WebNode::Source(n) => n,
        }
    }

    fn param(&self, param: Param) -> Option<web::AudioParam> {
        match (self, param) {
            (WebNode::Gain(n), Param::Gain) => Some(n.gain()),
            (WebNode::Oscillator(n), Param::Frequency) => Some(n.frequency()),
            (WebNode::Filter(n), Param::Frequency) => Some(n.frequency()),
            (WebNode::Filter(n), Param::Q) => Some(n.q()),
            _ => None,
        }
    }

    fn scheduled(&self) -> Option<&web::AudioScheduledSourceNode> {
        let source: &web::AudioScheduledSourceNode = match self {
            WebNode::Oscillator(n) => n,
            WebNode::Source(n) => n,
            _ => return None,
        };
        Some(source)
    }
}

fn osc_type(shape: OscShape) -> web::OscillatorType {
    match shape {
        OscShape::Sine => web::OscillatorType::Sine,
        OscShape::Square => web::OscillatorType::Square,
        OscShape::Sawtooth => web::OscillatorType::Sawtooth,
        OscShape::Triangle => web::OscillatorType::Triangle,
    }
}

fn filter_type(kind: FilterKind) -> web::BiquadFilterType {
    match kind {
        FilterKind::Lowpass => web::BiquadFilterType::Lowpass,
        FilterKind::Highpass => web::BiquadFilterType::Highpass,
        FilterKind::Bandpass => web::BiquadFilterType::Bandpass,
    }
}

pub struct WebAudio {
    ctx: web::AudioContext,
}

impl WebAudio {
    /// Open a context and ask it to resume. Browsers only allow this from
    /// inside a user gesture.
    pub fn open() -> FxResult<Self> {
        let ctx =
            web::AudioContext::new().map_err(|e| FxError::AudioUnavailable(format!("{:?}", e)))?;
        match ctx.resume() {
            Ok(promise) => spawn_local(async move {
                if let Err(e) = JsFuture::from(promise).await {
                    log::warn!("[sound] AudioContext.resume rejected: {:?}", e);
                }
            }),
            Err(e) => log::warn!("[sound] AudioContext.resume: {:?}", e),
        }
        log::info!("[sound] AudioContext open at {} Hz", ctx.sample_rate());
        Ok(Self { ctx })
    }

    fn buffer(&self, data: &SampleBuffer) -> Result<web::AudioBuffer, JsValue> {
        let buf = self.ctx.create_buffer(
            data.channels.len() as u32,
            data.frames().max(1) as u32,
            data.sample_rate,
        )?;
        for (ch, samples) in data.channels.iter().enumerate() {
            let mut samples = samples.clone();
            buf.copy_to_channel(&mut samples, ch as i32)?;
        }
        Ok(buf)
    }

    fn build(&self, spec: NodeSpec<'_>) -> Result<WebNode, JsValue> {
        let node = match spec {
            NodeSpec::Gain { gain } => {
                let g = web::GainNode::new(&self.ctx)?;
                g.gain().set_value(gain);
                WebNode::Gain(g)
            }
            NodeSpec::Oscillator { shape, frequency } => {
                let o = web::OscillatorNode::new(&self.ctx)?;
                o.set_type(osc_type(shape));
                o.frequency().set_value(frequency);
                WebNode::Oscillator(o)
            }
            NodeSpec::Filter { kind, frequency, q } => {
                let f = web::BiquadFilterNode::new(&self.ctx)?;
                f.set_type(filter_type(kind));
                f.frequency().set_value(frequency);
                f.q().set_value(q);
                WebNode::Filter(f)
            }
            NodeSpec::WaveShaper { curve } => {
                #[allow(deprecated)]
                let s = web::WaveShaperNode::new(&self.ctx)?;
                let mut curve = curve.to_vec();
                #[allow(deprecated)]
                s.set_curve(Some(curve.as_mut_slice()));
                WebNode::Shaper(s)
            }
            NodeSpec::Convolver { impulse } => {
                let c = web::ConvolverNode::new(&self.ctx)?;
                c.set_buffer(Some(&self.buffer(impulse)?));
                WebNode::Convolver(c)
            }
            NodeSpec::BufferSource { buffer, looping } => {
                let s = web::AudioBufferSourceNode::new(&self.ctx)?;
                s.set_buffer(Some(&self.buffer(buffer)?));
                s.set_loop(looping);
                WebNode::Source(s)
            }
        };
        Ok(node)
    }
}

impl AudioBackend for WebAudio {
    type Node = WebNode;

    fn current_time(&self) -> f64 {
        self.ctx.current_time()
    }

    fn sample_rate(&self) -> f32 {
        self.ctx.sample_rate()
    }

    fn create(&mut self, spec: NodeSpec<'_>) -> FxResult<WebNode> {
        let kind = spec.kind();
        self.build(spec).map_err(|e| FxError::NodeCreation {
            kind,
            reason: format!("{:?}", e),
        })
    }

    fn connect(&mut self, from: &WebNode, to: &WebNode) {
        if let Err(e) = from.node().connect_with_audio_node(to.node()) {
            log::error!("[sound] connect: {:?}", e);
        }
    }

    fn connect_param(&mut self, from: &WebNode, to: &WebNode, param: Param) {
        let Some(target) = to.param(param) else {
            log::error!("[sound] no {param:?} on target node");
            return;
        };
        if let Err(e) = from.node().connect_with_audio_param(&target) {
            log::error!("[sound] connect {param:?}: {:?}", e);
        }
    }

    fn connect_output(&mut self, from: &WebNode) {
        if let Err(e) = from.node().connect_with_audio_node(&self.ctx.destination()) {
            log::error!("[sound] connect destination: {:?}", e);
        }
    }

    fn disconnect(&mut self, node: &WebNode) {
        _ = node.node().disconnect();
    }

    fn automate(&mut self, node: &WebNode, param: Param, event: Automation) {
        let Some(p) = node.param(param) else {
            log::error!("[sound] no {param:?} to automate");
            return;
        };
        let res = match event {
            Automation::SetValueAtTime { value, at } => p.set_value_at_time(value, at),
            Automation::LinearRampTo { value, at } => p.linear_ramp_to_value_at_time(value, at),
            Automation::ExponentialRampTo { value, at } => {
                p.exponential_ramp_to_value_at_time(value, at)
            }
            Automation::SetTargetAtTime {
                target,
                start,
                time_constant,
            } => p.set_target_at_time(target, start, time_constant as f32),
        };
        if let Err(e) = res {
            log::warn!("[sound] {event:?}: {:?}", e);
        }
    }

    fn start(&mut self, node: &WebNode, when: f64) {
        if let Some(s) = node.scheduled() {
            _ = s.start_with_when(when);
        }
    }

    fn stop(&mut self, node: &WebNode, when: f64) {
        if let Some(s) = node.scheduled() {
            _ = s.stop_with_when(when);
        }
    }
}

// Recording test doubles for the platform seams.

#![allow(dead_code)]

use fx_core::audio::{AudioBackend, Automation, NodeSpec, Opener, Param};
use fx_core::{FxError, FxResult, Primitive, Surface2d};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

#[derive(Debug, Default)]
pub struct GraphLog {
    pub opened: usize,
    pub created: Vec<&'static str>,
    pub connections: Vec<(usize, usize)>,
    pub param_connections: Vec<(usize, usize, Param)>,
    pub outputs: Vec<usize>,
    pub disconnected: HashSet<usize>,
    pub automations: Vec<(usize, Param, Automation)>,
    pub started: Vec<(usize, f64)>,
    pub stopped: Vec<(usize, f64)>,
    pub time: f64,
}

impl GraphLog {
    pub fn count(&self, kind: &str) -> usize {
        self.created.iter().filter(|k| **k == kind).count()
    }

    pub fn live_nodes(&self) -> usize {
        self.created.len() - self.disconnected.len()
    }

    /// Sources that were started and never stopped.
    pub fn running_sources(&self) -> usize {
        let stopped: HashSet<usize> = self.stopped.iter().map(|(id, _)| *id).collect();
        self.started
            .iter()
            .filter(|(id, _)| !stopped.contains(id))
            .count()
    }
}

#[derive(Clone)]
pub struct RecordingBackend {
    pub log: Rc<RefCell<GraphLog>>,
    pub fail_on: Option<&'static str>,
}

impl AudioBackend for RecordingBackend {
    type Node = usize;

    fn current_time(&self) -> f64 {
        self.log.borrow().time
    }

    fn sample_rate(&self) -> f32 {
        // small rate keeps generated buffers cheap
        8000.0
    }

    fn create(&mut self, spec: NodeSpec<'_>) -> FxResult<usize> {
        if self.fail_on == Some(spec.kind()) {
            return Err(FxError::NodeCreation {
                kind: spec.kind(),
                reason: "refused by test".into(),
            });
        }
        let mut log = self.log.borrow_mut();
        log.created.push(spec.kind());
        Ok(log.created.len() - 1)
    }

    fn connect(&mut self, from: &usize, to: &usize) {
        self.log.borrow_mut().connections.push((*from, *to));
    }

    fn connect_param(&mut self, from: &usize, to: &usize, param: Param) {
        self.log
            .borrow_mut()
            .param_connections
            .push((*from, *to, param));
    }

    fn connect_output(&mut self, from: &usize) {
        self.log.borrow_mut().outputs.push(*from);
    }

    fn disconnect(&mut self, node: &usize) {
        self.log.borrow_mut().disconnected.insert(*node);
    }

    fn automate(&mut self, node: &usize, param: Param, event: Automation) {
        self.log.borrow_mut().automations.push((*node, param, event));
    }

    fn start(&mut self, node: &usize, when: f64) {
        self.log.borrow_mut().started.push((*node, when));
    }

    fn stop(&mut self, node: &usize, when: f64) {
        self.log.borrow_mut().stopped.push((*node, when));
    }
}

pub fn recording_opener(log: &Rc<RefCell<GraphLog>>) -> Opener<RecordingBackend> {
    failing_node_opener(log, None)
}

pub fn failing_node_opener(
    log: &Rc<RefCell<GraphLog>>,
    fail_on: Option<&'static str>,
) -> Opener<RecordingBackend> {
    let log = log.clone();
    Box::new(move || {
        log.borrow_mut().opened += 1;
        Ok(RecordingBackend {
            log: log.clone(),
            fail_on,
        })
    })
}

pub fn unavailable_opener() -> Opener<RecordingBackend> {
    Box::new(|| Err(FxError::AudioUnavailable("no AudioContext".into())))
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub width: u32,
    pub height: u32,
    pub clears: usize,
    pub drawn: Vec<Primitive>,
}

impl RecordingSurface {
    pub fn sized(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }
}

impl Surface2d for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    fn clear(&mut self) {
        self.clears += 1;
        self.drawn.clear();
    }

    fn draw(&mut self, primitive: &Primitive) {
        self.drawn.push(*primitive);
    }
}

//! Live particle/ripple simulation.
//!
//! `CursorField` owns every live primitive. Pointer handlers spawn into it,
//! `step` advances it by one display frame and drops whatever died.

use crate::constants::*;
use crate::device::EffectBudget;
use crate::particles::{Particle, Ripple};
use glam::Vec2;
use instant::Instant;
use rand::prelude::*;
use smallvec::SmallVec;
use std::collections::VecDeque;
use std::time::Duration;

/// A ripple wave waiting for its staggered start.
#[derive(Clone, Debug)]
pub struct PendingRipple {
    pub due: Instant,
    pub ripple: Ripple,
}

pub struct CursorField {
    budget: EffectBudget,
    particles: VecDeque<Particle>,
    ripples: Vec<Ripple>,
    pending: SmallVec<[PendingRipple; 6]>,
    last_spawn: Option<Instant>,
    pointer: Vec2,
    rng: StdRng,
}

impl CursorField {
    pub fn new(budget: EffectBudget, seed: u64) -> Self {
        Self::with_rng(budget, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(budget: EffectBudget, rng: StdRng) -> Self {
        Self {
            budget,
            particles: VecDeque::with_capacity(budget.max_particles),
            ripples: Vec::new(),
            pending: SmallVec::new(),
            last_spawn: None,
            pointer: Vec2::ZERO,
            rng,
        }
    }

    pub fn budget(&self) -> EffectBudget {
        self.budget
    }

    pub fn particles(&self) -> &VecDeque<Particle> {
        &self.particles
    }

    pub fn ripples(&self) -> &[Ripple] {
        &self.ripples
    }

    pub fn pending_ripples(&self) -> &[PendingRipple] {
        &self.pending
    }

    /// Last pointer position seen by either handler.
    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn is_idle(&self) -> bool {
        self.particles.is_empty() && self.ripples.is_empty() && self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
        self.ripples.clear();
        self.pending.clear();
    }

    /// Trail particles around the pointer, at most one batch per spawn interval.
    /// Returns the number of particles spawned.
    pub fn on_pointer_move(&mut self, pos: Vec2, now: Instant) -> usize {
        self.pointer = pos;
        let interval = Duration::from_millis(SPAWN_INTERVAL_MS);
        if let Some(last) = self.last_spawn {
            if now <= last + interval {
                return 0;
            }
        }
        self.last_spawn = Some(now);
        let mut spawned = 0;
        for _ in 0..self.budget.spawn_per_move {
            let jitter = Vec2::new(
                (self.rng.gen::<f32>() - 0.5) * 2.0 * SPAWN_JITTER_PX,
                (self.rng.gen::<f32>() - 0.5) * 2.0 * SPAWN_JITTER_PX,
            );
            if self.push_particle(pos + jitter) {
                spawned += 1;
            }
        }
        spawned
    }

    /// Radial burst around the click point plus a staggered ripple sequence.
    pub fn on_pointer_down(&mut self, pos: Vec2, now: Instant) {
        self.pointer = pos;
        let count = self.budget.burst_count;
        for i in 0..count {
            let angle = std::f32::consts::TAU * i as f32 / count as f32;
            let distance = BURST_DISTANCE_MIN + self.rng.gen::<f32>() * BURST_DISTANCE_SPAN;
            self.push_particle(pos + Vec2::from_angle(angle) * distance);
        }
        for wave in 0..RIPPLE_WAVES {
            self.pending.push(PendingRipple {
                due: now + Duration::from_millis(RIPPLE_STAGGER_MS * wave as u64),
                ripple: Ripple::wave(pos, wave),
            });
        }
        log::trace!("burst of {count} at ({:.0},{:.0})", pos.x, pos.y);
    }

    /// Release due ripple waves, then advance everything by one frame and
    /// drop what died.
    pub fn step(&mut self, now: Instant) {
        self.release_due(now);
        self.particles.retain_mut(|p| p.advance());
        self.ripples.retain_mut(|r| r.advance());
    }

    fn release_due(&mut self, now: Instant) {
        let mut i = 0;
        while i < self.pending.len() {
            if self.pending[i].due <= now {
                let wave = self.pending.remove(i);
                self.ripples.push(wave.ripple);
            } else {
                i += 1;
            }
        }
    }

    /// False when the budget allows no particles at all.
    fn push_particle(&mut self, pos: Vec2) -> bool {
        if self.budget.max_particles == 0 {
            return false;
        }
        while self.particles.len() >= self.budget.max_particles {
            self.particles.pop_front();
        }
        let particle = Particle::spawn(pos, &mut self.rng);
        self.particles.push_back(particle);
        true
    }
}

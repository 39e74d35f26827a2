//! Sample-level helpers: noise, impulse responses and shaping curves.

use super::backend::SampleBuffer;
use crate::constants::*;
use rand::Rng;

/// xorshift32 step, mapped to [-1, 1].
#[inline]
fn xorshift_noise(state: &mut u32) -> f32 {
    let mut x = *state;
    x ^= x << 13;
    x ^= x >> 17;
    x ^= x << 5;
    *state = x;
    (x as f32 / u32::MAX as f32) * 2.0 - 1.0
}

/// Stereo reverb impulse: noise under a `(1 - i/N)^2` envelope.
///
/// Fixed seeds make the result depend only on the sample rate.
pub fn reverb_impulse(sample_rate: f32) -> SampleBuffer {
    let len = (sample_rate * REVERB_SECONDS) as usize;
    let channels = REVERB_SEEDS
        .iter()
        .map(|&seed| {
            let mut state = seed;
            (0..len)
                .map(|i| {
                    let env = 1.0 - i as f32 / len as f32;
                    xorshift_noise(&mut state) * env * env
                })
                .collect()
        })
        .collect();
    SampleBuffer {
        sample_rate,
        channels,
    }
}

/// Mono white noise, `seconds` long.
pub fn white_noise<R: Rng>(sample_rate: f32, seconds: f32, rng: &mut R) -> SampleBuffer {
    let len = (sample_rate * seconds) as usize;
    let samples = (0..len).map(|_| rng.gen::<f32>() * 2.0 - 1.0).collect();
    SampleBuffer {
        sample_rate,
        channels: vec![samples],
    }
}

/// Soft clipper: `tanh(drive * x)` sampled over x in [-1, 1).
pub fn tanh_curve(len: usize, drive: f32) -> Vec<f32> {
    let half = len as f32 / 2.0;
    (0..len)
        .map(|i| (drive * (i as f32 / half - 1.0)).tanh())
        .collect()
}

// Shared visual/audio tuning constants used by the core engine and the web frontend.

// Particle budgets per device class
pub const MAX_PARTICLES_POINTER: usize = 80;
pub const MAX_PARTICLES_TOUCH: usize = 20;
pub const SPAWN_PER_MOVE_POINTER: usize = 3;
pub const SPAWN_PER_MOVE_TOUCH: usize = 1;
pub const BURST_COUNT_POINTER: usize = 15;
pub const BURST_COUNT_TOUCH: usize = 5;

// Pointer-move spawning
pub const SPAWN_INTERVAL_MS: u64 = 16; // at most one batch per interval
pub const SPAWN_JITTER_PX: f32 = 10.0; // +/- per axis

// Particle shape and motion
pub const PARTICLE_SIZE_MIN: f32 = 2.0;
pub const PARTICLE_SIZE_SPAN: f32 = 4.0;
pub const PARTICLE_DECAY_MIN: f32 = 0.015;
pub const PARTICLE_DECAY_SPAN: f32 = 0.02;
pub const PARTICLE_SPEED_SPAN: f32 = 1.5; // velocity per axis in [-span/2, span/2)
pub const PARTICLE_SHRINK: f32 = 0.98; // size multiplier per frame
pub const PARTICLE_MIN_SIZE: f32 = 0.5;
pub const PARTICLE_GLOW_SCALE: f32 = 3.0; // glow radius relative to core radius

// Click burst
pub const BURST_DISTANCE_MIN: f32 = 10.0;
pub const BURST_DISTANCE_SPAN: f32 = 30.0;

// Ripples
pub const RIPPLE_WAVES: usize = 3;
pub const RIPPLE_STAGGER_MS: u64 = 80;
pub const RIPPLE_START_RADIUS: f32 = 5.0;
pub const RIPPLE_BASE_MAX_RADIUS: f32 = 120.0;
pub const RIPPLE_MAX_RADIUS_STEP: f32 = 30.0;
pub const RIPPLE_BASE_ALPHA: f32 = 0.8;
pub const RIPPLE_ALPHA_STEP: f32 = 0.15;
pub const RIPPLE_BASE_LINE_WIDTH: f32 = 3.0;
pub const RIPPLE_LINE_WIDTH_STEP: f32 = 0.5;
pub const RIPPLE_GROWTH_PX: f32 = 4.0;
pub const RIPPLE_FADE: f32 = 0.015;
pub const RIPPLE_OUTER_BLUR: f32 = 20.0;
pub const RIPPLE_INNER_BLUR: f32 = 10.0;

// Master bus
pub const MASTER_RAMP_TIME_CONSTANT: f64 = 0.1;

// Ambient drone
pub const DRONE_FREQUENCIES: [f32; 4] = [55.0, 82.5, 110.0, 165.0];
pub const DRONE_GAIN: f32 = 0.08;
pub const DRONE_DRY_GAIN: f32 = 0.7;
pub const DRONE_REVERB_GAIN: f32 = 0.3;
pub const DRONE_LFO_BASE_HZ: f32 = 0.1;
pub const DRONE_LFO_STEP_HZ: f32 = 0.05;
pub const DRONE_LFO_DEPTH: f32 = 0.02; // fraction of the voice frequency
pub const DRONE_VOICE_LEVEL: f32 = 0.15; // divided by (index + 1)
pub const DRONE_FILTER_BASE_HZ: f32 = 400.0;
pub const DRONE_FILTER_STEP_HZ: f32 = 100.0;
pub const DRONE_FILTER_Q: f32 = 0.5;
pub const DRONE_NOISE_SECONDS: f32 = 2.0;
pub const DRONE_NOISE_FILTER_HZ: f32 = 200.0;
pub const DRONE_NOISE_FILTER_Q: f32 = 0.3;
pub const DRONE_NOISE_GAIN: f32 = 0.02;

// Reverb impulse
pub const REVERB_SECONDS: f32 = 3.0;
pub const REVERB_CHANNELS: usize = 2;
pub const REVERB_SEEDS: [u32; REVERB_CHANNELS] = [0x1234_ABCD, 0x7890_FEDC];

// Click
pub const CLICK_LENGTH_SEC: f64 = 0.1;
pub const CLICK_LEVEL: f32 = 0.15;
pub const ENVELOPE_FLOOR: f32 = 0.001;
pub const CLICK_HIGHPASS_HZ: f32 = 500.0;
pub const CLICK_CURVE_LEN: usize = 256;
pub const CLICK_DRIVE: f32 = 3.0;
pub const GLITCH_COUNT: usize = 3;
pub const GLITCH_FREQ_MIN: f32 = 100.0;
pub const GLITCH_FREQ_SPAN: f32 = 2000.0;
pub const GLITCH_WINDOW_SEC: f64 = 0.05;
pub const GLITCH_LEVEL: f32 = 0.05;

// Hover
pub const HOVER_LENGTH_SEC: f64 = 0.15;
pub const HOVER_LEVEL: f32 = 0.03;
pub const HOVER_ATTACK_SEC: f64 = 0.02;
pub const HOVER_BANDPASS_HZ: f32 = 4000.0;
pub const HOVER_BANDPASS_Q: f32 = 5.0;

// Whoosh
pub const WHOOSH_LENGTH_SEC: f64 = 0.6;
pub const WHOOSH_LEVEL: f32 = 0.12;
pub const WHOOSH_ATTACK_SEC: f64 = 0.1;
pub const WHOOSH_FILTER_Q: f32 = 2.0;
pub const WHOOSH_SWEEP_HZ: [f32; 3] = [100.0, 800.0, 200.0];
pub const WHOOSH_SWEEP_PEAK: f64 = 0.3; // fraction of the length
pub const WHOOSH_SUB_HZ: [f32; 2] = [60.0, 40.0];
pub const WHOOSH_SUB_LEVEL: f32 = 0.1;
pub const WHOOSH_SUB_ATTACK_SEC: f64 = 0.15;

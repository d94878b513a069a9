//! Frame smoothing and reaction tuning constants.
//!
//! These constants express intended behavior (time constants, clamp limits,
//! onset thresholds) and keep magic numbers out of the per-frame code.

// Largest frame step the damping formulas are fed (seconds)
pub const MAX_FRAME_DELTA_SEC: f32 = 0.25;

// Band split of the frequency buffer (percent of the bin count, rounded up)
pub const BASS_BIN_PERCENT: usize = 8;
pub const MID_BIN_PERCENT: usize = 32;

// AnalyserNode byte encodings
pub const FREQUENCY_BYTE_SCALE: f32 = 255.0;
pub const WAVEFORM_BYTE_CENTER: f32 = 128.0;

// Metric damping rates (per second)
pub const METRIC_RATE_PLAYING: f32 = 14.0;
pub const METRIC_RATE_IDLE: f32 = 6.0;

// Silence adapter
pub const ACTIVITY_ENERGY_WEIGHT: f32 = 0.9;
pub const ACTIVITY_BAND_WEIGHT: f32 = 0.6;
pub const ACTIVITY_WAVE_WEIGHT: f32 = 0.7;
pub const ACTIVITY_NORMALIZER: f32 = 2.2;
pub const SILENCE_RATE_PLAYING: f32 = 2.8;
pub const SILENCE_RATE_IDLE: f32 = 1.6;
pub const MIN_VISIBILITY: f32 = 0.08;

// Dynamic intensity: combined drive is capped here before mapping to [min, max]
pub const DRIVE_CAP: f32 = 1.2;

// Motion direction flips (bass/energy onsets)
pub const MOTION_FLIP_BASS_WEIGHT: f32 = 0.7;
pub const MOTION_FLIP_ENERGY_WEIGHT: f32 = 0.4;
pub const MOTION_FLIP_THRESHOLD: f32 = 0.12;
pub const MOTION_FLIP_MIN_BASS: f32 = 0.38;
pub const MOTION_FLIP_MIN_ENERGY: f32 = 0.52;
pub const MOTION_FLIP_COOLDOWN_BASE: f32 = 0.3;
pub const MOTION_FLIP_COOLDOWN_SPAN: f32 = 0.4;
pub const MOTION_FLIP_COOLDOWN_JITTER: f32 = 0.25;

// Pitch direction flips (treble/wave onsets)
pub const PITCH_FLIP_TREBLE_WEIGHT: f32 = 0.6;
pub const PITCH_FLIP_WAVE_WEIGHT: f32 = 0.8;
pub const PITCH_FLIP_THRESHOLD: f32 = 0.16;
pub const PITCH_FLIP_COOLDOWN_BASE: f32 = 0.45;
pub const PITCH_FLIP_COOLDOWN_SPAN: f32 = 0.35;
pub const PITCH_FLIP_COOLDOWN_JITTER: f32 = 0.2;

// Intensity percentages
pub const INTENSITY_PERCENT_STEP: f32 = 5.0;
pub const BASE_PERCENT_MAX: f32 = 100.0;
pub const LIMIT_PERCENT_MAX: f32 = 200.0;

// Reactive uniforms
pub const UNIFORM_CAP: f32 = 3.0;
pub const MIN_ALPHA: f32 = 0.05;
pub const ROTATION_EPSILON: f32 = 1e-4;

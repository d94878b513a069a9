use crate::bands::AudioMetrics;
use crate::constants::*;
use crate::smoothing::damp;

/// Overall activity of the smoothed metrics, in `[0, 1]`.
pub fn activity(m: &AudioMetrics) -> f32 {
    let mix = (m.energy * ACTIVITY_ENERGY_WEIGHT
        + m.band_mean() * ACTIVITY_BAND_WEIGHT
        + m.wave * ACTIVITY_WAVE_WEIGHT)
        / ACTIVITY_NORMALIZER;
    if mix.is_finite() {
        mix.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Tracks how quiet the signal has been, to fade visuals in quiet passages.
///
/// The level is 1 when fully silent (or stopped) and falls toward 0 as
/// activity rises.
#[derive(Clone, Debug)]
pub struct SilenceAdapter {
    level: f32,
    adaptation_enabled: bool,
}

impl Default for SilenceAdapter {
    fn default() -> Self {
        Self {
            level: 1.0,
            adaptation_enabled: true,
        }
    }
}

impl SilenceAdapter {
    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn adaptation_enabled(&self) -> bool {
        self.adaptation_enabled
    }

    pub fn set_adaptation_enabled(&mut self, enabled: bool) {
        self.adaptation_enabled = enabled;
    }

    pub fn update(&mut self, metrics: &AudioMetrics, playing: bool, dt: f32) {
        let target = if playing { 1.0 - activity(metrics) } else { 1.0 };
        let rate = if playing {
            SILENCE_RATE_PLAYING
        } else {
            SILENCE_RATE_IDLE
        };
        let current = if self.level.is_finite() { self.level } else { 1.0 };
        self.level = damp(current, target.clamp(0.0, 1.0), rate, dt).clamp(0.0, 1.0);
    }

    /// Multiplier for alpha/brightness: dims toward `MIN_VISIBILITY` while
    /// playing quietly, 1 when stopped or when adaptation is off.
    pub fn visibility_factor(&self, playing: bool) -> f32 {
        if playing && self.adaptation_enabled {
            MIN_VISIBILITY + (1.0 - self.level.clamp(0.0, 1.0)) * (1.0 - MIN_VISIBILITY)
        } else {
            1.0
        }
    }

    /// Back to fully silent; the adaptation toggle is a user setting and stays.
    pub fn reset(&mut self) {
        self.level = 1.0;
    }
}

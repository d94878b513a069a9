//! Exponential damping and the per-frame metric smoother.

use crate::bands::{AudioMetrics, Metric};
use crate::constants::*;
use serde::{Deserialize, Serialize};

/// Frame-rate independent exponential approach of `current` toward `target`.
///
/// `rate` is per second. A non-positive rate or step leaves `current`
/// unchanged; a non-finite `current` snaps to `target` and a non-finite
/// `target` keeps `current`.
#[inline]
pub fn damp(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    if !target.is_finite() {
        return if current.is_finite() { current } else { 0.0 };
    }
    if !current.is_finite() {
        return target;
    }
    let rate = rate.max(0.0);
    let dt = dt.max(0.0);
    if rate == 0.0 || dt == 0.0 {
        return current;
    }
    let factor = 1.0 - (-rate * dt).exp();
    current + (target - current) * factor
}

/// Clamp a raw frame delta to `[0, MAX_FRAME_DELTA_SEC]`; non-finite becomes 0.
#[inline]
pub fn clamp_delta(dt: f32) -> f32 {
    if dt.is_finite() {
        dt.clamp(0.0, MAX_FRAME_DELTA_SEC)
    } else {
        0.0
    }
}

/// Positive-only frame-to-frame increase of each metric's raw target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricPulses {
    pub energy: f32,
    pub bass: f32,
    pub mid: f32,
    pub treble: f32,
    pub wave: f32,
}

impl MetricPulses {
    #[inline]
    pub fn get(&self, metric: Metric) -> f32 {
        match metric {
            Metric::Energy => self.energy,
            Metric::Bass => self.bass,
            Metric::Mid => self.mid,
            Metric::Treble => self.treble,
            Metric::Wave => self.wave,
        }
    }

    fn between(previous: &AudioMetrics, current: &AudioMetrics) -> Self {
        let pulse = |m: Metric| {
            let p = current.get(m) - previous.get(m);
            if p.is_finite() {
                p.max(0.0)
            } else {
                0.0
            }
        };
        Self {
            energy: pulse(Metric::Energy),
            bass: pulse(Metric::Bass),
            mid: pulse(Metric::Mid),
            treble: pulse(Metric::Treble),
            wave: pulse(Metric::Wave),
        }
    }
}

/// Damps raw metric targets into the engine's smoothed metrics and derives
/// the per-frame pulses.
#[derive(Clone, Debug)]
pub struct MetricSmoother {
    metrics: AudioMetrics,
    previous_targets: AudioMetrics,
    rate_playing: f32,
    rate_idle: f32,
}

impl Default for MetricSmoother {
    fn default() -> Self {
        Self::with_rates(METRIC_RATE_PLAYING, METRIC_RATE_IDLE)
    }
}

impl MetricSmoother {
    pub fn new() -> Self {
        Self::default()
    }

    /// Smoother with custom damping rates (per second) for the playing and
    /// stopped states.
    pub fn with_rates(rate_playing: f32, rate_idle: f32) -> Self {
        Self {
            metrics: AudioMetrics::default(),
            previous_targets: AudioMetrics::default(),
            rate_playing,
            rate_idle,
        }
    }

    /// Smoothed metrics after the last update.
    pub fn metrics(&self) -> &AudioMetrics {
        &self.metrics
    }

    /// Raw targets of the last update (the reference for the next pulse).
    pub fn previous_targets(&self) -> &AudioMetrics {
        &self.previous_targets
    }

    /// Advance by `dt` toward `targets`, returning this frame's pulses.
    pub fn update(&mut self, targets: &AudioMetrics, dt: f32, playing: bool) -> MetricPulses {
        let rate = if playing {
            self.rate_playing
        } else {
            self.rate_idle
        };
        let mut clean = *targets;
        for m in Metric::ALL {
            let v = clean.get_mut(m);
            *v = sanitize_unit(*v);
        }
        let pulses = MetricPulses::between(&self.previous_targets, &clean);
        for m in Metric::ALL {
            let value = self.metrics.get_mut(m);
            *value = damp(*value, clean.get(m), rate, dt).clamp(0.0, 1.0);
        }
        self.previous_targets = clean;
        pulses
    }

    pub fn reset(&mut self) {
        self.metrics = AudioMetrics::default();
        self.previous_targets = AudioMetrics::default();
    }
}

#[inline]
fn sanitize_unit(v: f32) -> f32 {
    if v.is_finite() {
        v.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

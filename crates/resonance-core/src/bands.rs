//! Band extraction.
//!
//! Reduces one frame of analyser output (a frequency-magnitude buffer and a
//! time-domain waveform buffer) to five scalar metrics. Malformed input never
//! fails: non-finite samples count as silence, out-of-range samples are
//! clamped and empty buffers yield zero.

use crate::constants::*;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Names of the five audio metrics, used to address pulses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Energy,
    Bass,
    Mid,
    Treble,
    Wave,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::Energy,
        Metric::Bass,
        Metric::Mid,
        Metric::Treble,
        Metric::Wave,
    ];
}

/// Five scalar audio metrics, each in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioMetrics {
    pub energy: f32,
    pub bass: f32,
    pub mid: f32,
    pub treble: f32,
    pub wave: f32,
}

impl AudioMetrics {
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

    #[inline]
    pub fn get_mut(&mut self, metric: Metric) -> &mut f32 {
        match metric {
            Metric::Energy => &mut self.energy,
            Metric::Bass => &mut self.bass,
            Metric::Mid => &mut self.mid,
            Metric::Treble => &mut self.treble,
            Metric::Wave => &mut self.wave,
        }
    }

    /// Mean of the three frequency bands.
    #[inline]
    pub fn band_mean(&self) -> f32 {
        (self.bass + self.mid + self.treble) / 3.0
    }
}

/// Bin ranges of the bass, mid and treble bands for a buffer of `len` bins.
///
/// Bass takes the first `ceil(8% * len)` bins, mid the next `ceil(32% * len)`
/// and treble the remainder. Ranges are clipped to the buffer and may be
/// empty for very short buffers.
pub fn band_ranges(len: usize) -> [Range<usize>; 3] {
    let bass = ceil_percent(len, BASS_BIN_PERCENT);
    let mid = ceil_percent(len, MID_BIN_PERCENT);
    let bass_end = bass.min(len);
    let mid_end = (bass + mid).min(len);
    [0..bass_end, bass_end..mid_end, mid_end..len]
}

#[inline]
fn ceil_percent(len: usize, percent: usize) -> usize {
    (len * percent).div_ceil(100)
}

/// Extract metrics from normalized buffers.
///
/// `frequency` samples are magnitudes in `[0, 1]`; `waveform` samples are in
/// `[-1, 1]` centred on zero.
pub fn extract(frequency: &[f32], waveform: &[f32]) -> AudioMetrics {
    let [bass, mid, treble] = band_ranges(frequency.len());
    AudioMetrics {
        energy: rms(frequency),
        bass: mean_range(frequency, bass),
        mid: mean_range(frequency, mid),
        treble: mean_range(frequency, treble),
        wave: mean_abs(waveform),
    }
}

/// Extract metrics from `AnalyserNode` byte buffers
/// (`getByteFrequencyData` / `getByteTimeDomainData`).
pub fn extract_bytes(frequency: &[u8], waveform: &[u8]) -> AudioMetrics {
    let freq = normalize_frequency_bytes(frequency);
    let wave = normalize_waveform_bytes(waveform);
    extract(&freq, &wave)
}

/// Map frequency bytes `0..=255` to `[0, 1]`.
pub fn normalize_frequency_bytes(bytes: &[u8]) -> Vec<f32> {
    bytes
        .iter()
        .map(|&b| b as f32 / FREQUENCY_BYTE_SCALE)
        .collect()
}

/// Map time-domain bytes (silence at 128) to `[-1, 1)`.
pub fn normalize_waveform_bytes(bytes: &[u8]) -> Vec<f32> {
    bytes
        .iter()
        .map(|&b| (b as f32 - WAVEFORM_BYTE_CENTER) / WAVEFORM_BYTE_CENTER)
        .collect()
}

#[inline]
fn magnitude(sample: f32) -> f32 {
    if sample.is_finite() {
        sample.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[inline]
fn deviation(sample: f32) -> f32 {
    if sample.is_finite() {
        sample.clamp(-1.0, 1.0).abs()
    } else {
        0.0
    }
}

fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: f32 = samples.iter().map(|&s| magnitude(s) * magnitude(s)).sum();
    (sum / samples.len() as f32).sqrt().clamp(0.0, 1.0)
}

fn mean_range(samples: &[f32], range: Range<usize>) -> f32 {
    match samples.get(range) {
        Some(bins) if !bins.is_empty() => {
            let sum: f32 = bins.iter().map(|&s| magnitude(s)).sum();
            (sum / bins.len() as f32).clamp(0.0, 1.0)
        }
        _ => 0.0,
    }
}

fn mean_abs(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: f32 = samples.iter().map(|&s| deviation(s)).sum();
    (sum / samples.len() as f32).clamp(0.0, 1.0)
}

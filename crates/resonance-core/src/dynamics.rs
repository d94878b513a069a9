//! Dynamic intensity modulation.
//!
//! Each channel runs a small relaxation oscillator: a `value` that eases
//! toward a `target`, and a hold `timer` that decides when the target is
//! re-rolled. A new target mixes the channel's audio drive, a little jitter,
//! the current onset pulse and a random kick, then maps the result into the
//! channel's `[min, max]` multiplier range. A strong pulse re-rolls the
//! target early, before the hold timer has expired.
//!
//! While a channel is disabled or audio is not playing the value relaxes
//! back to the neutral multiplier 1.

use crate::bands::{AudioMetrics, Metric};
use crate::channel::{Channel, ChannelMap, Modifiers};
use crate::constants::DRIVE_CAP;
use crate::rng::RandomSource;
use crate::smoothing::{damp, MetricPulses};
use serde::{Deserialize, Serialize};

/// Audio drive formula of a channel.
///
/// Each variant is a fixed weighted sum of two metrics, capped at
/// [`DRIVE_CAP`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Driver {
    /// `energy * 0.6 + bass * 0.85`
    EnergyBass,
    /// `mid * 0.85 + wave * 0.65`
    MidWave,
    /// `treble * 0.95 + energy * 0.45`
    TrebleEnergy,
    /// `treble * 0.9 + wave * 0.6`
    TrebleWave,
    /// `energy * 0.95 + mid * 0.45`
    EnergyMid,
    /// `wave * 0.85 + energy * 0.55`
    WaveEnergy,
}

impl Driver {
    pub fn evaluate(self, m: &AudioMetrics) -> f32 {
        let raw = match self {
            Driver::EnergyBass => m.energy * 0.6 + m.bass * 0.85,
            Driver::MidWave => m.mid * 0.85 + m.wave * 0.65,
            Driver::TrebleEnergy => m.treble * 0.95 + m.energy * 0.45,
            Driver::TrebleWave => m.treble * 0.9 + m.wave * 0.6,
            Driver::EnergyMid => m.energy * 0.95 + m.mid * 0.45,
            Driver::WaveEnergy => m.wave * 0.85 + m.energy * 0.55,
        };
        if !raw.is_finite() {
            return 0.0;
        }
        raw.min(DRIVE_CAP)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HoldRange {
    pub min: f32,
    pub max: f32,
}

/// Static configuration of one channel's modulator.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChannelDescriptor {
    pub min: f32,
    pub max: f32,
    pub hold: HoldRange,
    pub driver: Driver,
    pub pulse: Metric,
    pub pulse_threshold: f32,
    pub pulse_weight: f32,
    pub random_weight: f32,
    pub jitter: f32,
    pub damping: f32,
    pub relax_rate: f32,
}

const MOTION_DESCRIPTOR: ChannelDescriptor = ChannelDescriptor {
    min: 0.45,
    max: 1.55,
    hold: HoldRange {
        min: 0.38,
        max: 1.1,
    },
    driver: Driver::EnergyBass,
    pulse: Metric::Bass,
    pulse_threshold: 0.08,
    pulse_weight: 0.65,
    random_weight: 0.4,
    jitter: 0.18,
    damping: 3.8,
    relax_rate: 2.6,
};

impl ChannelDescriptor {
    /// The built-in descriptor for `channel`.
    ///
    /// Scale follows the same bass/energy signal as motion but keeps its own
    /// state.
    pub const fn for_channel(channel: Channel) -> Self {
        match channel {
            Channel::Motion | Channel::Scale => MOTION_DESCRIPTOR,
            Channel::Size => ChannelDescriptor {
                min: 0.5,
                max: 1.8,
                hold: HoldRange {
                    min: 0.42,
                    max: 1.35,
                },
                driver: Driver::MidWave,
                pulse: Metric::Mid,
                pulse_threshold: 0.07,
                pulse_weight: 0.6,
                random_weight: 0.35,
                jitter: 0.22,
                damping: 3.4,
                relax_rate: 2.4,
            },
            Channel::Hue => ChannelDescriptor {
                min: 0.35,
                max: 1.45,
                hold: HoldRange {
                    min: 0.52,
                    max: 1.4,
                },
                driver: Driver::TrebleEnergy,
                pulse: Metric::Treble,
                pulse_threshold: 0.07,
                pulse_weight: 0.65,
                random_weight: 0.45,
                jitter: 0.25,
                damping: 2.8,
                relax_rate: 2.2,
            },
            Channel::Saturation => ChannelDescriptor {
                min: 0.45,
                max: 1.6,
                hold: HoldRange {
                    min: 0.55,
                    max: 1.55,
                },
                driver: Driver::TrebleWave,
                pulse: Metric::Treble,
                pulse_threshold: 0.06,
                pulse_weight: 0.7,
                random_weight: 0.4,
                jitter: 0.23,
                damping: 2.9,
                relax_rate: 2.3,
            },
            Channel::Brightness => ChannelDescriptor {
                min: 0.45,
                max: 1.65,
                hold: HoldRange {
                    min: 0.5,
                    max: 1.45,
                },
                driver: Driver::EnergyMid,
                pulse: Metric::Energy,
                pulse_threshold: 0.07,
                pulse_weight: 0.7,
                random_weight: 0.35,
                jitter: 0.19,
                damping: 3.1,
                relax_rate: 2.5,
            },
            Channel::Alpha => ChannelDescriptor {
                min: 0.4,
                max: 1.25,
                hold: HoldRange {
                    min: 0.55,
                    max: 1.6,
                },
                driver: Driver::WaveEnergy,
                pulse: Metric::Wave,
                pulse_threshold: 0.05,
                pulse_weight: 0.6,
                random_weight: 0.32,
                jitter: 0.2,
                damping: 3.0,
                relax_rate: 2.4,
            },
        }
    }

    /// Copy with degenerate ranges repaired: hold min at least 0.1 s, hold
    /// max at least 0.05 s above it, and `max` at least 0.05 above `min`.
    pub fn sanitized(mut self) -> Self {
        let or = |v: f32, fallback: f32| if v.is_finite() { v } else { fallback };
        self.min = or(self.min, 0.35).max(0.0);
        self.max = or(self.max, 1.5).max(self.min + 0.05);
        self.hold.min = or(self.hold.min, 0.45).max(0.1);
        self.hold.max = or(self.hold.max, self.hold.min + 0.8).max(self.hold.min + 0.05);
        self.pulse_threshold = or(self.pulse_threshold, 0.08);
        self.pulse_weight = or(self.pulse_weight, 0.5);
        self.random_weight = or(self.random_weight, 0.3);
        self.jitter = or(self.jitter, 0.0).max(0.0);
        self.damping = or(self.damping, 3.0);
        self.relax_rate = or(self.relax_rate, 2.4);
        self
    }
}

/// The full descriptor table, one entry per channel.
pub fn descriptor_table() -> ChannelMap<ChannelDescriptor> {
    ChannelMap::from_fn(ChannelDescriptor::for_channel)
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DynamicChannelState {
    pub value: f32,
    pub target: f32,
    pub timer: f32,
}

impl Default for DynamicChannelState {
    fn default() -> Self {
        Self {
            value: 1.0,
            target: 1.0,
            timer: 0.0,
        }
    }
}

impl DynamicChannelState {
    fn relax(&mut self, rate: f32, dt: f32) {
        let current = if self.value.is_finite() { self.value } else { 1.0 };
        self.value = damp(current, 1.0, rate, dt);
        self.target = 1.0;
        self.timer = 0.0;
    }
}

#[derive(Clone, Debug)]
pub struct DynamicIntensityModulator {
    descriptors: ChannelMap<ChannelDescriptor>,
    states: ChannelMap<DynamicChannelState>,
}

impl Default for DynamicIntensityModulator {
    fn default() -> Self {
        Self::new(descriptor_table())
    }
}

impl DynamicIntensityModulator {
    pub fn new(descriptors: ChannelMap<ChannelDescriptor>) -> Self {
        let mut descriptors = descriptors;
        for (_, d) in descriptors.iter_mut() {
            *d = d.sanitized();
        }
        Self {
            descriptors,
            states: ChannelMap::splat(DynamicChannelState::default()),
        }
    }

    pub fn descriptor(&self, channel: Channel) -> &ChannelDescriptor {
        &self.descriptors[channel]
    }

    pub fn state(&self, channel: Channel) -> &DynamicChannelState {
        &self.states[channel]
    }

    /// Current multiplier of `channel` (1 is neutral).
    pub fn value(&self, channel: Channel) -> f32 {
        self.states[channel].value
    }

    pub fn reset(&mut self) {
        self.states = ChannelMap::splat(DynamicChannelState::default());
    }

    /// Advance every channel by `dt`.
    pub fn update<R: RandomSource + ?Sized>(
        &mut self,
        dt: f32,
        metrics: &AudioMetrics,
        pulses: &MetricPulses,
        playing: bool,
        modifiers: Modifiers,
        rng: &mut R,
    ) {
        for channel in Channel::ALL {
            let cfg = self.descriptors[channel];
            let state = &mut self.states[channel];
            if !playing || !modifiers.is_enabled(channel) {
                state.relax(cfg.relax_rate, dt);
                continue;
            }
            step_channel(channel, &cfg, state, dt, metrics, pulses, rng);
        }
    }
}

fn step_channel<R: RandomSource + ?Sized>(
    channel: Channel,
    cfg: &ChannelDescriptor,
    state: &mut DynamicChannelState,
    dt: f32,
    metrics: &AudioMetrics,
    pulses: &MetricPulses,
    rng: &mut R,
) {
    let timer = if state.timer.is_finite() {
        state.timer
    } else {
        0.0
    };
    state.timer = timer - dt;

    let drive = finite_or_zero(cfg.driver.evaluate(metrics)).clamp(0.0, DRIVE_CAP);
    let jitter = if cfg.jitter > 0.0 {
        rng.range(-cfg.jitter, cfg.jitter)
            .clamp(-cfg.jitter, cfg.jitter)
    } else {
        0.0
    };
    let pulse = finite_or_zero(pulses.get(cfg.pulse)).max(0.0);

    if state.timer <= 0.0 || pulse > cfg.pulse_threshold {
        let combined = (drive
            + jitter
            + pulse * cfg.pulse_weight
            + rng.range(0.0, cfg.random_weight))
        .clamp(0.0, DRIVE_CAP);
        state.target = (cfg.min + (cfg.max - cfg.min) * combined.min(1.0)).clamp(cfg.min, cfg.max);
        state.timer = rng.range(cfg.hold.min, cfg.hold.max).max(cfg.hold.min);
        log::trace!(
            "dynamic {channel}: target {:.3}, hold {:.2}s (pulse {pulse:.3})",
            state.target,
            state.timer
        );
    }

    let target = if state.target.is_finite() {
        state.target.clamp(cfg.min, cfg.max)
    } else {
        1.0
    };
    let current = if state.value.is_finite() {
        state.value
    } else {
        1.0
    };
    state.value = damp(current, target, cfg.damping, dt).clamp(cfg.min, cfg.max);
}

#[inline]
fn finite_or_zero(v: f32) -> f32 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

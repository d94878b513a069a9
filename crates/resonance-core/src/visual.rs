//! Visual targets and the engine's public visual state.
//!
//! Each channel has a raw target computed from the smoothed metrics. The
//! effective intensity scales the target's deviation from the channel's
//! neutral value, the result is clamped to the channel's bounds, and the
//! public state eases toward it at a fixed per-channel rate.

use crate::bands::AudioMetrics;
use crate::channel::{Channel, ChannelMap, Modifiers};
use crate::smoothing::damp;
use serde::{Deserialize, Serialize};

/// Neutral value, bounds and easing rate of one visual channel.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct VisualMapping {
    pub neutral: f32,
    pub min: f32,
    pub max: f32,
    pub rate: f32,
}

impl VisualMapping {
    pub const fn for_channel(channel: Channel) -> Self {
        let (neutral, min, max, rate) = match channel {
            Channel::Motion => (0.0, 0.0, 3.8, 6.0),
            Channel::Size => (1.0, 0.4, 3.4, 7.0),
            Channel::Scale => (1.0, 0.4, 3.4, 5.0),
            Channel::Hue => (0.0, -720.0, 720.0, 3.0),
            Channel::Alpha => (0.0, 0.0, 0.9, 6.0),
            Channel::Saturation => (0.0, -0.4, 1.0, 5.0),
            Channel::Brightness => (0.0, -0.4, 1.1, 5.0),
        };
        Self {
            neutral,
            min,
            max,
            rate,
        }
    }

    /// Scale `raw`'s deviation from neutral by `intensity` and clamp.
    pub fn scale(&self, raw: f32, intensity: f32) -> f32 {
        let raw = if raw.is_finite() { raw } else { self.neutral };
        let intensity = if intensity.is_finite() {
            intensity.max(0.0)
        } else {
            0.0
        };
        (self.neutral + (raw - self.neutral) * intensity).clamp(self.min, self.max)
    }
}

/// Unscaled, metric-driven target of `channel`.
pub fn raw_target(channel: Channel, m: &AudioMetrics) -> f32 {
    let (raw, cap) = match channel {
        Channel::Motion => (m.energy * 1.6 + m.bass * 2.5, 3.2),
        Channel::Size => (1.0 + m.mid * 1.45 + m.wave * 0.6, 2.6),
        Channel::Scale => (1.0 + m.energy * 0.65 + m.wave * 0.5 + m.bass * 0.45, 2.6),
        Channel::Hue => (m.treble * 160.0 + m.energy * 20.0, f32::INFINITY),
        Channel::Alpha => (m.energy * 0.45 + m.wave * 0.3 + m.mid * 0.2, 0.7),
        Channel::Saturation => (m.treble * 0.6 + m.wave * 0.28, f32::INFINITY),
        Channel::Brightness => (m.energy * 0.75 + m.mid * 0.35, f32::INFINITY),
    };
    if !raw.is_finite() {
        return VisualMapping::for_channel(channel).neutral;
    }
    raw.min(cap)
}

/// Bounded targets for every channel given the effective intensities.
pub fn map_targets(metrics: &AudioMetrics, intensity: &ChannelMap<f32>) -> ChannelMap<f32> {
    ChannelMap::from_fn(|c| {
        VisualMapping::for_channel(c).scale(raw_target(c, metrics), intensity[c])
    })
}

/// The engine's public output, consumed by the rendering collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct VisualState {
    pub motion: f32,
    pub size: f32,
    pub hue: f32,
    pub alpha: f32,
    pub scale: f32,
    pub saturation: f32,
    pub brightness: f32,
}

impl Default for VisualState {
    fn default() -> Self {
        Self::neutral()
    }
}

impl VisualState {
    pub fn neutral() -> Self {
        Self {
            motion: 0.0,
            size: 1.0,
            hue: 0.0,
            alpha: 0.0,
            scale: 1.0,
            saturation: 0.0,
            brightness: 0.0,
        }
    }

    pub fn get(&self, channel: Channel) -> f32 {
        match channel {
            Channel::Motion => self.motion,
            Channel::Scale => self.scale,
            Channel::Size => self.size,
            Channel::Hue => self.hue,
            Channel::Saturation => self.saturation,
            Channel::Brightness => self.brightness,
            Channel::Alpha => self.alpha,
        }
    }

    pub fn get_mut(&mut self, channel: Channel) -> &mut f32 {
        match channel {
            Channel::Motion => &mut self.motion,
            Channel::Scale => &mut self.scale,
            Channel::Size => &mut self.size,
            Channel::Hue => &mut self.hue,
            Channel::Saturation => &mut self.saturation,
            Channel::Brightness => &mut self.brightness,
            Channel::Alpha => &mut self.alpha,
        }
    }

    /// Ease toward `targets` (or neutral, for disabled channels) by `dt`.
    pub fn advance(&mut self, targets: &ChannelMap<f32>, modifiers: Modifiers, dt: f32) {
        for channel in Channel::ALL {
            let mapping = VisualMapping::for_channel(channel);
            let target = if modifiers.is_enabled(channel) {
                targets[channel]
            } else {
                mapping.neutral
            };
            let value = self.get_mut(channel);
            let current = if value.is_finite() {
                *value
            } else {
                mapping.neutral
            };
            *value = damp(current, target, mapping.rate, dt).clamp(mapping.min, mapping.max);
        }
    }

    /// Snap one channel back to its neutral value.
    pub fn neutralize(&mut self, channel: Channel) {
        *self.get_mut(channel) = VisualMapping::for_channel(channel).neutral;
    }
}

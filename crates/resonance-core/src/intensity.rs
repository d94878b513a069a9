//! User-configured intensity per channel.
//!
//! Each channel has a `base` intensity and an upper `limit`. The UI speaks in
//! percentages (snapped to 5% steps): the base as a share of the current
//! limit, the limit as a share of the channel's default limit. The engine
//! multiplies the base with the dynamic modulator's value to get the
//! effective intensity.

use crate::channel::{Channel, ChannelMap};
use crate::constants::*;
use serde::{Deserialize, Serialize};

/// How `set_limit` treats the existing base.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LimitChange {
    /// Rescale the base so it keeps its percentage of the limit.
    #[default]
    PreserveRatio,
    /// Keep the absolute base, clamped to the new limit.
    KeepBase,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct IntensityChannel {
    pub base: f32,
    pub limit: f32,
}

/// Default absolute base intensity of a channel.
pub fn default_base(channel: Channel) -> f32 {
    match channel {
        Channel::Motion => 0.1,
        _ => 1.0,
    }
}

/// Default absolute limit of a channel (the 100% point of `set_limit`).
pub fn default_limit(channel: Channel) -> f32 {
    match channel {
        Channel::Motion => 0.2,
        _ => 1.0,
    }
}

/// Round to the nearest 5% step and clamp to `[0, max]`.
///
/// Non-finite input yields `fallback`, itself rounded and clamped.
pub fn snap_percent(value: f32, fallback: f32, max: f32) -> f32 {
    let max = if max.is_finite() { max.max(0.0) } else { LIMIT_PERCENT_MAX };
    let v = if value.is_finite() { value } else { fallback };
    if !v.is_finite() {
        return 0.0;
    }
    let rounded = (v / INTENSITY_PERCENT_STEP).round() * INTENSITY_PERCENT_STEP;
    rounded.clamp(0.0, max)
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IntensityStore {
    channels: ChannelMap<IntensityChannel>,
}

impl Default for IntensityStore {
    fn default() -> Self {
        Self {
            channels: ChannelMap::from_fn(|c| IntensityChannel {
                base: default_base(c),
                limit: default_limit(c),
            }),
        }
    }
}

impl IntensityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn channel(&self, channel: Channel) -> IntensityChannel {
        self.channels[channel]
    }

    pub fn base(&self, channel: Channel) -> f32 {
        self.channels[channel].base
    }

    pub fn limit(&self, channel: Channel) -> f32 {
        let limit = self.channels[channel].limit;
        if limit.is_finite() && limit >= 0.0 {
            limit
        } else {
            default_limit(channel)
        }
    }

    /// Effective intensity: `max(base, 0) * max(dynamic, 0)`.
    ///
    /// A non-finite dynamic multiplier counts as neutral (1).
    pub fn effective(&self, channel: Channel, dynamic: f32) -> f32 {
        let base = self.base(channel);
        let base = if base.is_finite() { base.max(0.0) } else { 0.0 };
        let dynamic = if dynamic.is_finite() {
            dynamic.max(0.0)
        } else {
            1.0
        };
        base * dynamic
    }

    /// Set the base as a percentage of the current limit.
    pub fn set_base(&mut self, channel: Channel, percent: f32) {
        let limit = self.limit(channel);
        let snapped = snap_percent(percent, BASE_PERCENT_MAX, BASE_PERCENT_MAX);
        let base = if limit > 0.0 {
            snapped / 100.0 * limit
        } else {
            0.0
        };
        self.channels[channel].base = base.clamp(0.0, limit);
        log::debug!("intensity base {channel} -> {snapped}% ({base:.3})");
    }

    /// Set the limit as a percentage of the channel's default limit.
    pub fn set_limit(&mut self, channel: Channel, percent: f32, change: LimitChange) {
        let previous = self.limit(channel);
        let snapped = snap_percent(percent, 100.0, LIMIT_PERCENT_MAX);
        let limit = snapped / 100.0 * default_limit(channel);
        let current = self.base(channel);
        let current = if current.is_finite() { current } else { 0.0 };
        let base = match change {
            LimitChange::PreserveRatio if previous > 0.0 => current / previous * limit,
            LimitChange::PreserveRatio => 0.0,
            LimitChange::KeepBase => current,
        };
        let base = if base.is_finite() { base } else { 0.0 };
        let entry = &mut self.channels[channel];
        entry.limit = limit;
        entry.base = base.clamp(0.0, limit);
        log::debug!(
            "intensity limit {channel} -> {snapped}% ({limit:.3}), base {:.3}",
            entry.base
        );
    }

    /// Base as the percentage of the limit a UI would show.
    pub fn base_percent(&self, channel: Channel) -> f32 {
        let limit = self.limit(channel);
        if limit <= 0.0 {
            return 0.0;
        }
        snap_percent(self.base(channel) / limit * 100.0, 0.0, BASE_PERCENT_MAX)
    }

    /// Limit as the percentage of the default limit a UI would show.
    pub fn limit_percent(&self, channel: Channel) -> f32 {
        snap_percent(
            self.limit(channel) / default_limit(channel) * 100.0,
            100.0,
            LIMIT_PERCENT_MAX,
        )
    }
}

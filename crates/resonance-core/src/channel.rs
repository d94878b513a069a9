//! Visual channels and per-channel storage.
//!
//! Every user-facing reaction (motion, scale, size, hue, saturation,
//! brightness, alpha) is addressed by a [`Channel`]. Per-channel data lives in
//! a fixed-size [`ChannelMap`] so lookups never allocate or fail.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;
use thiserror::Error;

/// A visual parameter the engine drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Motion,
    Scale,
    Size,
    Hue,
    Saturation,
    Brightness,
    Alpha,
}

impl Channel {
    pub const COUNT: usize = 7;

    pub const ALL: [Channel; Channel::COUNT] = [
        Channel::Motion,
        Channel::Scale,
        Channel::Size,
        Channel::Hue,
        Channel::Saturation,
        Channel::Brightness,
        Channel::Alpha,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Channel::Motion => "motion",
            Channel::Scale => "scale",
            Channel::Size => "size",
            Channel::Hue => "hue",
            Channel::Saturation => "saturation",
            Channel::Brightness => "brightness",
            Channel::Alpha => "alpha",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelParseError {
    #[error("unknown channel name: {0:?}")]
    Unknown(String),
    #[error("empty channel name")]
    Empty,
}

impl FromStr for Channel {
    type Err = ChannelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        if key.is_empty() {
            return Err(ChannelParseError::Empty);
        }
        Channel::ALL
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(key))
            .ok_or_else(|| ChannelParseError::Unknown(key.to_string()))
    }
}

/// One value per [`Channel`], indexed by the channel itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelMap<T>([T; Channel::COUNT]);

impl<T> ChannelMap<T> {
    pub fn from_fn(mut f: impl FnMut(Channel) -> T) -> Self {
        Self(Channel::ALL.map(&mut f))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Channel, &T)> {
        Channel::ALL.iter().copied().zip(self.0.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Channel, &mut T)> {
        Channel::ALL.iter().copied().zip(self.0.iter_mut())
    }
}

impl<T: Copy> ChannelMap<T> {
    pub fn splat(value: T) -> Self {
        Self([value; Channel::COUNT])
    }
}

impl<T> Index<Channel> for ChannelMap<T> {
    type Output = T;

    #[inline]
    fn index(&self, channel: Channel) -> &T {
        &self.0[channel.index()]
    }
}

impl<T> IndexMut<Channel> for ChannelMap<T> {
    #[inline]
    fn index_mut(&mut self, channel: Channel) -> &mut T {
        &mut self.0[channel.index()]
    }
}

/// User toggles: which channels react to audio at all.
///
/// Passed by value into every component on each frame so no component reads
/// a shared mutable bag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers(ChannelMap<bool>);

impl Default for Modifiers {
    fn default() -> Self {
        Self::all_enabled()
    }
}

impl Modifiers {
    pub fn all_enabled() -> Self {
        Self(ChannelMap::splat(true))
    }

    pub fn all_disabled() -> Self {
        Self(ChannelMap::splat(false))
    }

    #[inline]
    pub fn is_enabled(&self, channel: Channel) -> bool {
        self.0[channel]
    }

    pub fn set(&mut self, channel: Channel, enabled: bool) {
        self.0[channel] = enabled;
    }

    pub fn with(mut self, channel: Channel, enabled: bool) -> Self {
        self.set(channel, enabled);
        self
    }
}

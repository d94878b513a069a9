//! Render-facing values derived from the engine state each frame.
//!
//! The engine does not know how these are drawn. A host copies
//! [`ReactiveUniforms`] into its material uniforms (the struct is plain
//! `f32` data and can be cast to bytes), applies [`ColorShift`] to its base
//! colour and rotates its scene graph by [`RotationStep`].

use crate::bands::AudioMetrics;
use crate::channel::{Channel, ChannelMap, Modifiers};
use crate::constants::*;
use crate::direction::DirectionState;
use crate::visual::VisualState;
use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Host-side appearance the alpha uniforms are boosted from.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BaseAppearance {
    pub point_alpha: f32,
    pub tiny_alpha: f32,
}

impl Default for BaseAppearance {
    fn default() -> Self {
        Self {
            point_alpha: 0.7,
            tiny_alpha: 0.5,
        }
    }
}

/// Everything the derivations below read, borrowed from the engine.
#[derive(Clone, Copy, Debug)]
pub struct FrameView<'a> {
    pub visual: &'a VisualState,
    pub metrics: &'a AudioMetrics,
    /// Effective intensity per channel (base times dynamic multiplier).
    pub intensity: &'a ChannelMap<f32>,
    pub modifiers: Modifiers,
    pub directions: &'a DirectionState,
    pub visibility: f32,
    pub dt: f32,
}

impl FrameView<'_> {
    /// Effective intensity of an enabled channel, 0 when disabled.
    fn enabled_intensity(&self, channel: Channel) -> f32 {
        if self.modifiers.is_enabled(channel) {
            nonneg(self.intensity[channel])
        } else {
            0.0
        }
    }

    fn intensity(&self, channel: Channel) -> f32 {
        nonneg(self.intensity[channel])
    }
}

/// Colour adjustments for the host's base hue/saturation/value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorShift {
    /// Degrees added to the base hue.
    pub hue_offset: f32,
    pub saturation_delta: f32,
    pub brightness_delta: f32,
    /// Added to saturation after scaling by `visibility`.
    pub saturation_boost: f32,
    /// Added to brightness before the whole value is scaled by `visibility`.
    pub brightness_boost: f32,
    pub visibility: f32,
}

impl ColorShift {
    pub fn from_frame(frame: &FrameView<'_>) -> Self {
        let m = frame.modifiers;
        let v = frame.visual;
        let pick = |channel, value: f32, lo: f32, hi: f32| {
            if m.is_enabled(channel) {
                finite_or(value, 0.0).clamp(lo, hi)
            } else {
                0.0
            }
        };
        let boost_gain = |channel| band_gain(frame.enabled_intensity(channel), 0.25, 1.6);
        Self {
            hue_offset: pick(Channel::Hue, v.hue, -540.0, 540.0),
            saturation_delta: pick(Channel::Saturation, v.saturation, -0.35, 0.9),
            brightness_delta: pick(Channel::Brightness, v.brightness, -0.35, 1.05),
            saturation_boost: frame.metrics.treble * 0.22 * boost_gain(Channel::Saturation),
            brightness_boost: frame.metrics.energy * 0.32 * boost_gain(Channel::Brightness),
            visibility: finite_or(frame.visibility, 1.0).clamp(0.0, 1.0),
        }
    }

    /// Apply to a base HSV colour (hue in degrees, saturation and value in
    /// `[0, 1]`-ish units), returning the reactive HSV triple.
    pub fn apply(&self, hue: f32, saturation: f32, value: f32) -> Vec3 {
        let h = (hue + self.hue_offset).rem_euclid(360.0);
        let s = (saturation + self.saturation_delta).clamp(0.05, 1.4);
        let b = (value + self.brightness_delta).clamp(0.05, 1.6);
        let s = (s + self.saturation_boost * self.visibility).clamp(0.05, 1.4);
        let b = ((b + self.brightness_boost) * self.visibility).clamp(0.05, 1.6);
        Vec3::new(h, s, b)
    }
}

/// Scene rotation for one frame, in radians.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RotationStep {
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
}

impl RotationStep {
    pub fn from_frame(frame: &FrameView<'_>) -> Self {
        if !frame.modifiers.is_enabled(Channel::Motion) {
            return Self::default();
        }
        let intensity = frame.intensity(Channel::Motion);
        let strength = finite_or(frame.visual.motion, 0.0).clamp(0.0, 4.5);
        if strength <= ROTATION_EPSILON || intensity <= 0.0 {
            return Self::default();
        }
        let m = intensity.max(0.4);
        let dt = frame.dt;
        let dirs = frame.directions;
        let roll_dir = if dirs.motion_direction >= 0.0 { 1.0 } else { -1.0 };

        let yaw = strength * dirs.motion_direction * dt * (0.75 + m * 1.15);
        let tilt = (frame.metrics.wave * (0.35 + m * 0.55)).clamp(-3.5, 3.5);
        let pitch = tilt * dirs.pitch_direction * dt * (0.6 + m * 0.4);
        let roll_base = (frame.metrics.treble * (0.26 + m * 0.4)).clamp(0.0, 3.2);
        let roll = roll_base * roll_dir * dt * (0.4 + m * 0.35);

        Self {
            yaw: bounded_angle(yaw),
            pitch: bounded_angle(pitch),
            roll: bounded_angle(roll),
        }
    }

    pub fn as_vec3(&self) -> Vec3 {
        Vec3::new(self.pitch, self.yaw, self.roll)
    }

    pub fn is_zero(&self) -> bool {
        self.yaw == 0.0 && self.pitch == 0.0 && self.roll == 0.0
    }
}

/// Per-frame material uniforms.
///
/// Layout is 20 `f32`s (80 bytes, a multiple of 16 for uniform buffers).
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct ReactiveUniforms {
    /// Bass, mid and treble, gained by the scale intensity.
    pub bands: [f32; 3],
    pub energy: f32,
    pub wave: f32,
    /// Multiplier on the host's point size factors.
    pub size_boost: f32,
    /// Uniform scale of the particle cluster.
    pub sphere_scale: f32,
    pub alpha: f32,
    pub tiny_alpha: f32,
    pub hue_offset: f32,
    pub saturation_delta: f32,
    pub brightness_delta: f32,
    pub saturation_boost: f32,
    pub brightness_boost: f32,
    pub visibility: f32,
    /// Pitch, yaw, roll (x, y, z rotation) for this frame.
    pub rotation: [f32; 3],
    /// Multiplier on the host's tiny-point size factor.
    pub tiny_size_boost: f32,
    pub _pad: [f32; 1],
}

impl ReactiveUniforms {
    pub fn from_frame(frame: &FrameView<'_>, base: BaseAppearance) -> Self {
        let m = frame.metrics;
        let v = frame.visual;
        let mods = frame.modifiers;

        let size_boost = if mods.is_enabled(Channel::Size) {
            let e = band_gain(frame.enabled_intensity(Channel::Size), 0.35, 1.5);
            1.0 + (finite_or(v.size, 1.0).clamp(0.2, 4.5) - 1.0) * e
        } else {
            1.0
        };
        let sphere_scale = if mods.is_enabled(Channel::Scale) {
            let e = band_gain(frame.enabled_intensity(Channel::Scale), 0.35, 1.5);
            (1.0 + (finite_or(v.scale, 1.0).clamp(0.25, 3.5) - 1.0) * e).clamp(0.25, 3.5)
        } else {
            1.0
        };

        let gain = 0.75 + frame.intensity(Channel::Scale) * 0.75;
        let bands = [
            (m.bass * gain).min(UNIFORM_CAP),
            (m.mid * gain * 0.92).min(UNIFORM_CAP),
            (m.treble * gain * 1.08).min(UNIFORM_CAP),
        ];
        let energy = (m.energy * (0.8 + frame.intensity(Channel::Motion) * 0.7)).min(UNIFORM_CAP);
        let wave = (m.wave * (0.8 + frame.intensity(Channel::Size) * 0.7)).min(UNIFORM_CAP);

        let color = ColorShift::from_frame(frame);
        let alpha_visual = if mods.is_enabled(Channel::Alpha) {
            finite_or(v.alpha, 0.0).clamp(0.0, 1.2)
        } else {
            0.0
        };
        let alpha = ((finite_or(base.point_alpha, 0.0) + alpha_visual) * color.visibility)
            .clamp(MIN_ALPHA, 1.0);
        let tiny_alpha =
            ((finite_or(base.tiny_alpha, 0.0) + alpha_visual * 0.4) * color.visibility).min(1.0);

        let size_wave = if mods.is_enabled(Channel::Size) { wave } else { 0.0 };
        let tiny_size_boost = (0.8 + size_boost * 0.2 + size_wave * 0.25).max(0.05);

        let rotation = RotationStep::from_frame(frame);

        Self {
            bands,
            energy,
            wave,
            size_boost,
            sphere_scale,
            alpha,
            tiny_alpha,
            hue_offset: color.hue_offset,
            saturation_delta: color.saturation_delta,
            brightness_delta: color.brightness_delta,
            saturation_boost: color.saturation_boost,
            brightness_boost: color.brightness_boost,
            visibility: color.visibility,
            rotation: rotation.as_vec3().to_array(),
            tiny_size_boost,
            _pad: [0.0; 1],
        }
    }

    pub fn band_vector(&self) -> Vec3 {
        Vec3::from_array(self.bands)
    }

    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(std::slice::from_ref(self))
    }
}

// Effective gain from a channel intensity: 0 when silent, otherwise clamped.
#[inline]
fn band_gain(intensity: f32, lo: f32, hi: f32) -> f32 {
    if intensity > 0.0 {
        intensity.clamp(lo, hi)
    } else {
        0.0
    }
}

#[inline]
fn bounded_angle(a: f32) -> f32 {
    if a.is_finite() && a.abs() < PI {
        a
    } else {
        0.0
    }
}

#[inline]
fn finite_or(v: f32, fallback: f32) -> f32 {
    if v.is_finite() {
        v
    } else {
        fallback
    }
}

#[inline]
fn nonneg(v: f32) -> f32 {
    if v.is_finite() {
        v.max(0.0)
    } else {
        0.0
    }
}

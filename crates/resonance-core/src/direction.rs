//! Rotation direction hysteresis.
//!
//! Strong onsets flip the sign of the yaw (bass/energy) and pitch
//! (treble/wave) rotation. After a flip, a cooldown that is longer at low
//! motion intensity blocks further flips of the same axis.

use crate::bands::AudioMetrics;
use crate::constants::*;
use crate::rng::RandomSource;
use crate::smoothing::MetricPulses;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DirectionState {
    /// Yaw sign, `1.0` or `-1.0`.
    pub motion_direction: f32,
    /// Pitch sign, `1.0` or `-1.0`.
    pub pitch_direction: f32,
    pub motion_flip_cooldown: f32,
    pub pitch_flip_cooldown: f32,
}

impl Default for DirectionState {
    fn default() -> Self {
        Self {
            motion_direction: 1.0,
            pitch_direction: 1.0,
            motion_flip_cooldown: 0.0,
            pitch_flip_cooldown: 0.0,
        }
    }
}

impl DirectionState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Both signs back to `+1`; cooldowns keep running.
    pub fn reset_directions(&mut self) {
        self.motion_direction = 1.0;
        self.pitch_direction = 1.0;
    }

    /// Advance by `dt`.
    ///
    /// `targets` are the frame's raw metric targets, `motion_active` is true
    /// when audio plays, the motion channel is enabled and its effective
    /// intensity is positive.
    pub fn update<R: RandomSource + ?Sized>(
        &mut self,
        dt: f32,
        targets: &AudioMetrics,
        pulses: &MetricPulses,
        motion_active: bool,
        motion_intensity: f32,
        rng: &mut R,
    ) {
        self.motion_flip_cooldown = decay(self.motion_flip_cooldown, dt);
        self.pitch_flip_cooldown = decay(self.pitch_flip_cooldown, dt);

        if !motion_active {
            self.reset_directions();
            return;
        }
        let slack = 1.0 - motion_intensity.clamp(0.0, 1.0);

        if self.motion_flip_cooldown <= 0.0 {
            let beat =
                pulses.bass * MOTION_FLIP_BASS_WEIGHT + pulses.energy * MOTION_FLIP_ENERGY_WEIGHT;
            if beat > MOTION_FLIP_THRESHOLD
                && (targets.bass > MOTION_FLIP_MIN_BASS || targets.energy > MOTION_FLIP_MIN_ENERGY)
            {
                self.motion_direction = -sign(self.motion_direction);
                self.motion_flip_cooldown = MOTION_FLIP_COOLDOWN_BASE
                    + slack * MOTION_FLIP_COOLDOWN_SPAN
                    + rng.range(0.0, MOTION_FLIP_COOLDOWN_JITTER);
                log::trace!(
                    "motion direction -> {} (beat {beat:.3}, cooldown {:.2}s)",
                    self.motion_direction,
                    self.motion_flip_cooldown
                );
            }
        }

        if self.pitch_flip_cooldown <= 0.0 {
            let tilt =
                pulses.treble * PITCH_FLIP_TREBLE_WEIGHT + pulses.wave * PITCH_FLIP_WAVE_WEIGHT;
            if tilt > PITCH_FLIP_THRESHOLD {
                self.pitch_direction = -sign(self.pitch_direction);
                self.pitch_flip_cooldown = PITCH_FLIP_COOLDOWN_BASE
                    + slack * PITCH_FLIP_COOLDOWN_SPAN
                    + rng.range(0.0, PITCH_FLIP_COOLDOWN_JITTER);
                log::trace!(
                    "pitch direction -> {} (tilt {tilt:.3}, cooldown {:.2}s)",
                    self.pitch_direction,
                    self.pitch_flip_cooldown
                );
            }
        }
    }
}

#[inline]
fn decay(cooldown: f32, dt: f32) -> f32 {
    if cooldown.is_finite() {
        (cooldown - dt).max(0.0)
    } else {
        0.0
    }
}

// Anything that is not a clean negative counts as +1.
#[inline]
fn sign(direction: f32) -> f32 {
    if direction < 0.0 {
        -1.0
    } else {
        1.0
    }
}

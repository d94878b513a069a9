// Tuning constants and their relationships.

use resonance_core::constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn time_constants_are_positive() {
    assert!(MAX_FRAME_DELTA_SEC > 0.0);
    assert!(METRIC_RATE_PLAYING > METRIC_RATE_IDLE && METRIC_RATE_IDLE > 0.0);
    assert!(SILENCE_RATE_PLAYING > SILENCE_RATE_IDLE && SILENCE_RATE_IDLE > 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn band_split_leaves_room_for_treble() {
    assert!(BASS_BIN_PERCENT > 0);
    assert!(BASS_BIN_PERCENT + MID_BIN_PERCENT < 100);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn activity_weights_normalize_to_one() {
    let full = ACTIVITY_ENERGY_WEIGHT + ACTIVITY_BAND_WEIGHT + ACTIVITY_WAVE_WEIGHT;
    assert!((full / ACTIVITY_NORMALIZER - 1.0).abs() < 1e-6);
    assert!(MIN_VISIBILITY > 0.0 && MIN_VISIBILITY < 1.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn flip_cooldowns_are_positive() {
    assert!(MOTION_FLIP_COOLDOWN_BASE > 0.0 && MOTION_FLIP_COOLDOWN_JITTER >= 0.0);
    assert!(PITCH_FLIP_COOLDOWN_BASE > 0.0 && PITCH_FLIP_COOLDOWN_JITTER >= 0.0);
    assert!(MOTION_FLIP_THRESHOLD > 0.0 && PITCH_FLIP_THRESHOLD > 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn percent_ranges_are_whole_steps() {
    assert_eq!(BASE_PERCENT_MAX % INTENSITY_PERCENT_STEP, 0.0);
    assert_eq!(LIMIT_PERCENT_MAX % INTENSITY_PERCENT_STEP, 0.0);
    assert!(LIMIT_PERCENT_MAX >= BASE_PERCENT_MAX);
}

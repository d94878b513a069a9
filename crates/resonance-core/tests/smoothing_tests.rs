// Damping and the metric smoother.

use resonance_core::smoothing::{clamp_delta, damp, MetricSmoother};
use resonance_core::AudioMetrics;

#[test]
fn damp_moves_half_way_at_ln2_rate_over_one_second() {
    let v = damp(0.0, 1.0, std::f32::consts::LN_2, 1.0);
    assert!((v - 0.5).abs() < 1e-5, "got {v}");
}

#[test]
fn damp_is_frame_rate_independent() {
    let one = damp(0.0, 1.0, 5.0, 0.2);
    let mut two = 0.0;
    for _ in 0..4 {
        two = damp(two, 1.0, 5.0, 0.05);
    }
    assert!((one - two).abs() < 1e-5);
}

#[test]
fn damp_guards_degenerate_inputs() {
    assert_eq!(damp(0.3, 1.0, 5.0, 0.0), 0.3);
    assert_eq!(damp(0.3, 1.0, 0.0, 0.1), 0.3);
    assert_eq!(damp(0.3, f32::NAN, 5.0, 0.1), 0.3);
    assert_eq!(damp(f32::NAN, 0.7, 5.0, 0.1), 0.7);
}

#[test]
fn frame_delta_is_clamped() {
    assert_eq!(clamp_delta(1.0), 0.25);
    assert_eq!(clamp_delta(-0.5), 0.0);
    assert_eq!(clamp_delta(f32::NAN), 0.0);
    assert_eq!(clamp_delta(0.016), 0.016);
}

#[test]
fn playing_smooths_faster_than_idle() {
    let target = AudioMetrics {
        energy: 1.0,
        ..Default::default()
    };
    let mut playing = MetricSmoother::new();
    let mut idle = MetricSmoother::new();
    playing.update(&target, 0.1, true);
    idle.update(&target, 0.1, false);
    let expected_playing = 1.0 - (-1.4f32).exp();
    let expected_idle = 1.0 - (-0.6f32).exp();
    assert!((playing.metrics().energy - expected_playing).abs() < 1e-5);
    assert!((idle.metrics().energy - expected_idle).abs() < 1e-5);
}

#[test]
fn pulses_are_positive_only_target_increases() {
    let mut s = MetricSmoother::new();
    let loud = AudioMetrics {
        bass: 0.5,
        treble: 0.2,
        ..Default::default()
    };
    let p = s.update(&loud, 0.016, true);
    assert!((p.bass - 0.5).abs() < 1e-6);
    assert!((p.treble - 0.2).abs() < 1e-6);
    assert_eq!(p.energy, 0.0);

    let p = s.update(&loud, 0.016, true);
    assert_eq!(p.bass, 0.0, "same target twice is no pulse");

    let p = s.update(&AudioMetrics::default(), 0.016, true);
    assert_eq!(p.bass, 0.0, "a drop is never a pulse");
}

#[test]
fn non_finite_targets_are_treated_as_silence() {
    let mut s = MetricSmoother::new();
    let bad = AudioMetrics {
        energy: f32::NAN,
        bass: f32::INFINITY,
        mid: 4.0,
        treble: -1.0,
        wave: 0.5,
    };
    let p = s.update(&bad, 0.1, true);
    let m = s.metrics();
    for v in [m.energy, m.bass, m.mid, m.treble, m.wave] {
        assert!(v.is_finite() && (0.0..=1.0).contains(&v));
    }
    assert_eq!(p.energy, 0.0);
    assert_eq!(p.bass, 0.0);
    assert!((p.mid - 1.0).abs() < 1e-6);
    assert_eq!(s.previous_targets().mid, 1.0);
}

#[test]
fn reset_forgets_previous_targets() {
    let mut s = MetricSmoother::new();
    let loud = AudioMetrics {
        bass: 0.8,
        ..Default::default()
    };
    s.update(&loud, 0.1, true);
    s.reset();
    assert_eq!(*s.metrics(), AudioMetrics::default());
    let p = s.update(&loud, 0.1, true);
    assert!((p.bass - 0.8).abs() < 1e-6);
}

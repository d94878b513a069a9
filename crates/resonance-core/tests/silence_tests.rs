// Activity, silence level and visibility.

use resonance_core::silence::activity;
use resonance_core::{AudioMetrics, SilenceAdapter};

fn full() -> AudioMetrics {
    AudioMetrics {
        energy: 1.0,
        bass: 1.0,
        mid: 1.0,
        treble: 1.0,
        wave: 1.0,
    }
}

#[test]
fn activity_is_normalized() {
    assert_eq!(activity(&AudioMetrics::default()), 0.0);
    assert!((activity(&full()) - 1.0).abs() < 1e-5);
    let nan = AudioMetrics {
        energy: f32::NAN,
        ..Default::default()
    };
    assert_eq!(activity(&nan), 0.0);
}

#[test]
fn starts_silent_and_dims_while_playing_quietly() {
    let mut s = SilenceAdapter::default();
    assert_eq!(s.level(), 1.0);
    assert_eq!(s.visibility_factor(false), 1.0);

    s.update(&AudioMetrics::default(), true, 0.1);
    assert_eq!(s.level(), 1.0);
    assert!((s.visibility_factor(true) - 0.08).abs() < 1e-6);
}

#[test]
fn loud_audio_lifts_visibility() {
    let mut s = SilenceAdapter::default();
    for _ in 0..100 {
        s.update(&full(), true, 0.1);
    }
    assert!(s.level() < 1e-3);
    assert!(s.visibility_factor(true) > 0.999);
}

#[test]
fn stopping_fades_back_to_silent_more_slowly() {
    let mut playing = SilenceAdapter::default();
    let mut stopped = SilenceAdapter::default();
    for _ in 0..100 {
        playing.update(&full(), true, 0.1);
        stopped.update(&full(), true, 0.1);
    }
    playing.update(&AudioMetrics::default(), true, 0.1);
    stopped.update(&full(), false, 0.1);
    // both head to 1; the stopped adapter uses the slower rate
    assert!(stopped.level() < playing.level());
    assert!(stopped.level() > 0.0);
}

#[test]
fn disabling_adaptation_keeps_full_visibility() {
    let mut s = SilenceAdapter::default();
    s.set_adaptation_enabled(false);
    s.update(&AudioMetrics::default(), true, 0.1);
    assert_eq!(s.visibility_factor(true), 1.0);
}

#[test]
fn reset_returns_to_silent_but_keeps_the_toggle() {
    let mut s = SilenceAdapter::default();
    s.set_adaptation_enabled(false);
    for _ in 0..10 {
        s.update(&full(), true, 0.1);
    }
    s.reset();
    assert_eq!(s.level(), 1.0);
    assert!(!s.adaptation_enabled());
}

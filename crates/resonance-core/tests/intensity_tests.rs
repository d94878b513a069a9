// Per-channel base/limit intensity configuration.

use rand::{rngs::StdRng, Rng, SeedableRng};
use resonance_core::intensity::{default_limit, snap_percent, IntensityStore, LimitChange};
use resonance_core::Channel;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

#[test]
fn defaults_match_channel_table() {
    let store = IntensityStore::new();
    assert!(approx(store.base(Channel::Motion), 0.1));
    assert!(approx(store.limit(Channel::Motion), 0.2));
    assert_eq!(store.base_percent(Channel::Motion), 50.0);
    for c in Channel::ALL.into_iter().filter(|c| *c != Channel::Motion) {
        assert_eq!(store.base(c), 1.0);
        assert_eq!(store.limit(c), 1.0);
        assert_eq!(store.limit_percent(c), 100.0);
    }
}

#[test]
fn snap_percent_rounds_to_five_and_clamps() {
    assert_eq!(snap_percent(42.0, 100.0, 100.0), 40.0);
    assert_eq!(snap_percent(43.0, 100.0, 100.0), 45.0);
    assert_eq!(snap_percent(130.0, 100.0, 100.0), 100.0);
    assert_eq!(snap_percent(-20.0, 100.0, 100.0), 0.0);
    assert_eq!(snap_percent(f32::NAN, 100.0, 200.0), 100.0);
}

#[test]
fn set_base_is_a_share_of_the_current_limit() {
    let mut store = IntensityStore::new();
    store.set_base(Channel::Hue, 42.0);
    assert!(approx(store.base(Channel::Hue), 0.4));

    store.set_base(Channel::Motion, 100.0);
    assert!(approx(store.base(Channel::Motion), 0.2));

    store.set_base(Channel::Size, 250.0);
    assert!(approx(store.base(Channel::Size), store.limit(Channel::Size)));

    store.set_base(Channel::Alpha, f32::NAN);
    assert!(approx(store.base(Channel::Alpha), 1.0));
}

#[test]
fn set_limit_preserves_base_ratio_by_default() {
    let mut store = IntensityStore::new();
    store.set_base(Channel::Hue, 50.0);
    store.set_limit(Channel::Hue, 200.0, LimitChange::PreserveRatio);
    assert!(approx(store.limit(Channel::Hue), 2.0));
    assert!(approx(store.base(Channel::Hue), 1.0));
    assert_eq!(store.base_percent(Channel::Hue), 50.0);
}

#[test]
fn set_limit_can_keep_the_absolute_base() {
    let mut store = IntensityStore::new();
    store.set_base(Channel::Size, 40.0);
    store.set_limit(Channel::Size, 200.0, LimitChange::KeepBase);
    assert!(approx(store.base(Channel::Size), 0.4));
    assert_eq!(store.base_percent(Channel::Size), 20.0);

    store.set_limit(Channel::Size, 20.0, LimitChange::KeepBase);
    assert!(approx(store.limit(Channel::Size), 0.2));
    assert!(approx(store.base(Channel::Size), 0.2), "base is clamped to the new limit");
}

#[test]
fn limit_is_relative_to_the_channel_default_and_capped() {
    let mut store = IntensityStore::new();
    store.set_limit(Channel::Motion, 150.0, LimitChange::PreserveRatio);
    assert!(approx(store.limit(Channel::Motion), 0.3));
    store.set_limit(Channel::Motion, 900.0, LimitChange::PreserveRatio);
    assert!(approx(store.limit(Channel::Motion), 2.0 * default_limit(Channel::Motion)));
    store.set_limit(Channel::Motion, f32::NAN, LimitChange::PreserveRatio);
    assert!(approx(store.limit(Channel::Motion), default_limit(Channel::Motion)));
}

#[test]
fn zero_limit_zeroes_base_and_recovers() {
    let mut store = IntensityStore::new();
    store.set_limit(Channel::Brightness, 0.0, LimitChange::PreserveRatio);
    assert_eq!(store.base(Channel::Brightness), 0.0);
    store.set_limit(Channel::Brightness, 100.0, LimitChange::PreserveRatio);
    assert_eq!(store.base(Channel::Brightness), 0.0);
    store.set_base(Channel::Brightness, 60.0);
    assert!(approx(store.base(Channel::Brightness), 0.6));
}

#[test]
fn base_never_exceeds_limit_after_any_setter_sequence() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut store = IntensityStore::new();
    for _ in 0..2000 {
        let c = Channel::ALL[rng.gen_range(0..Channel::COUNT)];
        let percent = rng.gen_range(-50.0..300.0);
        match rng.gen_range(0..3) {
            0 => store.set_base(c, percent),
            1 => store.set_limit(c, percent, LimitChange::PreserveRatio),
            _ => store.set_limit(c, percent, LimitChange::KeepBase),
        }
        for c in Channel::ALL {
            let base = store.base(c);
            let limit = store.limit(c);
            assert!(base >= 0.0 && base <= limit + 1e-6, "{c}: base {base} limit {limit}");
            assert!(limit <= 2.0 * default_limit(c) + 1e-6);
        }
    }
}

#[test]
fn effective_intensity_multiplies_base_and_dynamic() {
    let store = IntensityStore::new();
    assert!(approx(store.effective(Channel::Hue, 1.3), 1.3));
    assert!(approx(store.effective(Channel::Motion, 1.5), 0.15));
    assert_eq!(store.effective(Channel::Hue, -2.0), 0.0);
    assert!(approx(store.effective(Channel::Hue, f32::NAN), 1.0));
}

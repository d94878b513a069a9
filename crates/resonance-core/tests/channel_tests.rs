use resonance_core::{Channel, ChannelMap, ChannelParseError, Modifiers};

#[test]
fn channel_names_round_trip() {
    for c in Channel::ALL {
        let parsed: Channel = c.to_string().parse().expect("own name parses");
        assert_eq!(parsed, c);
    }
    assert_eq!(" Brightness ".parse::<Channel>(), Ok(Channel::Brightness));
}

#[test]
fn bad_channel_names_are_typed_errors() {
    assert_eq!("".parse::<Channel>(), Err(ChannelParseError::Empty));
    assert_eq!(
        "wobble".parse::<Channel>(),
        Err(ChannelParseError::Unknown("wobble".to_string()))
    );
    let msg = "wobble".parse::<Channel>().unwrap_err().to_string();
    assert!(msg.contains("wobble"));
}

#[test]
fn channel_map_indexes_by_channel() {
    let mut map = ChannelMap::from_fn(|c| c.index());
    for c in Channel::ALL {
        assert_eq!(map[c], c.index());
    }
    map[Channel::Hue] = 99;
    assert_eq!(map.iter().filter(|(_, v)| **v == 99).count(), 1);
}

#[test]
fn modifiers_toggle_individually() {
    let mods = Modifiers::default().with(Channel::Alpha, false);
    assert!(!mods.is_enabled(Channel::Alpha));
    assert!(Channel::ALL
        .iter()
        .filter(|c| **c != Channel::Alpha)
        .all(|c| mods.is_enabled(*c)));
    assert!(Channel::ALL.iter().all(|c| !Modifiers::all_disabled().is_enabled(*c)));
}

#[test]
fn modifiers_compare_by_flags() {
    assert_eq!(Modifiers::default(), Modifiers::all_enabled());
    let toggled = Modifiers::default().with(Channel::Size, false);
    assert_ne!(toggled, Modifiers::default());
    assert_eq!(toggled.with(Channel::Size, true), Modifiers::default());
    assert_eq!(ChannelMap::splat(true), ChannelMap::from_fn(|_| true));
}

#[test]
fn channels_serialize_lowercase() {
    let json = serde_json::to_string(&Channel::Saturation).expect("serialize");
    assert_eq!(json, "\"saturation\"");
}

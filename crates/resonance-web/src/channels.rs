//! Channel-name lookups shared by the JS-facing methods.

use anyhow::Context;
use resonance_core::Channel;

pub(crate) fn parse_channel(name: &str) -> anyhow::Result<Channel> {
    name.parse::<Channel>().with_context(|| format!("channel {name:?}"))
}

/// Run `f` on the parsed channel, logging and ignoring unknown names.
pub(crate) fn with_channel(name: &str, f: impl FnOnce(Channel)) {
    match parse_channel(name) {
        Ok(channel) => f(channel),
        Err(e) => log::warn!("ignoring {e:#}"),
    }
}

/// Read a per-channel value, logging unknown names and reading them as 0.
pub(crate) fn read_channel(name: &str, f: impl FnOnce(Channel) -> f32) -> f32 {
    match parse_channel(name) {
        Ok(channel) => f(channel),
        Err(e) => {
            log::warn!("reading 0 for {e:#}");
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_names_reach_the_callback() {
        assert_eq!(read_channel("size", |c| c.index() as f32), 2.0);
        assert_eq!(read_channel(" Alpha ", |c| c.index() as f32), 6.0);
        let mut seen = None;
        with_channel("hue", |c| seen = Some(c));
        assert_eq!(seen, Some(Channel::Hue));
    }

    #[test]
    fn unknown_names_read_as_zero_without_calling_back() {
        let mut called = false;
        let value = read_channel("wobble", |_| {
            called = true;
            7.0
        });
        assert_eq!(value, 0.0);
        assert!(!called);
        assert_eq!(read_channel("", |_| 7.0), 0.0);
        with_channel("wobble", |_| called = true);
        assert!(!called);
    }

    #[test]
    fn lookup_errors_name_the_channel() {
        let err = parse_channel("wobble").unwrap_err();
        assert!(format!("{err:#}").contains("\"wobble\""));
    }
}

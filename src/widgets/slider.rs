//! Slider (carousel) widget settings.
//!
//! The carousel itself is a third-party script. This module turns the data
//! attributes written on a slider element into the options object the
//! carousel expects, and tracks whether an element was already initialised
//! so it is never initialised twice.

use std::collections::BTreeMap;

use serde::Serialize;

/// Options passed to the carousel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SliderSettings {
    pub autoplay: bool,
    pub autoplay_speed: u32,
    pub fade: bool,
    pub infinite: bool,
    pub arrows: bool,
    pub dots: bool,
}

impl SliderSettings {
    /// Read settings from element attributes (`data-autoplay`, ...).
    ///
    /// Missing or unparsable attributes fall back to the defaults.
    pub fn from_attributes(attributes: &BTreeMap<String, String>) -> Self {
        let flag = |name: &str| {
            attributes
                .get(name)
                .is_some_and(|v| v.trim().eq_ignore_ascii_case("true") || v.trim() == "1")
        };
        Self {
            autoplay: flag("data-autoplay"),
            autoplay_speed: attributes
                .get("data-autoplay-speed")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(0),
            fade: flag("data-fade"),
            infinite: flag("data-is-infinite"),
            arrows: flag("data-show-arrows"),
            dots: flag("data-show-dots"),
        }
    }
}

/// Instruction for the host to run against the carousel script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum SliderCommand {
    /// Tear down the existing carousel on the element.
    Destroy,
    /// Initialise the carousel with these settings.
    Init { settings: SliderSettings },
}

/// Initialisation state of one slider element.
#[derive(Debug, Clone, Default)]
pub struct SliderMount {
    current: Option<SliderSettings>,
}

impl SliderMount {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_initialized(&self) -> bool {
        self.current.is_some()
    }

    /// Commands that (re)initialise the slider with `settings`.
    pub fn mount(&mut self, settings: SliderSettings) -> Vec<SliderCommand> {
        let mut commands = Vec::with_capacity(2);
        if self.current.is_some() {
            commands.push(SliderCommand::Destroy);
        }
        self.current = Some(settings.clone());
        commands.push(SliderCommand::Init { settings });
        commands
    }

    /// Commands that tear the slider down, if it is up.
    pub fn unmount(&mut self) -> Vec<SliderCommand> {
        match self.current.take() {
            Some(_) => vec![SliderCommand::Destroy],
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn attributes(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_settings_from_attributes() {
        let settings = SliderSettings::from_attributes(&attributes(&[
            ("data-autoplay", "true"),
            ("data-autoplay-speed", "4000"),
            ("data-show-dots", "1"),
            ("data-fade", "false"),
        ]));
        assert_eq!(
            settings,
            SliderSettings {
                autoplay: true,
                autoplay_speed: 4000,
                fade: false,
                infinite: false,
                arrows: false,
                dots: true,
            }
        );
    }

    #[test]
    fn test_bad_speed_defaults_to_zero() {
        let settings = SliderSettings::from_attributes(&attributes(&[("data-autoplay-speed", "fast")]));
        assert_eq!(settings.autoplay_speed, 0);
    }

    #[test]
    fn test_remount_destroys_first() {
        let mut mount = SliderMount::new();
        let first = mount.mount(SliderSettings::default());
        assert_eq!(first.len(), 1);
        assert!(mount.is_initialized());

        let second = mount.mount(SliderSettings::default());
        assert_eq!(second[0], SliderCommand::Destroy);
        assert!(matches!(second[1], SliderCommand::Init { .. }));

        assert_eq!(mount.unmount(), vec![SliderCommand::Destroy]);
        assert!(mount.unmount().is_empty());
    }
}

//! Configuration file support for traceline
//!
//! Config file location: `~/.config/traceline/config.toml` (XDG_CONFIG_HOME)
//!
//! Example config:
//! ```toml
//! [scroll]
//! # units are terminal rows
//! wheel_threshold = 9.0
//! deadzone = 0.5
//! max_step_per_event = 3
//! line_height = 1.0
//! bottom_padding = 2.0
//!
//! [ui]
//! theme_mode = "dark"
//! scrollbar = true
//! case_panel = true
//!
//! [playback]
//! animation = true
//! stiffness = 260.0
//! damping = 30.0
//! ```

use serde::Deserialize;
use std::path::PathBuf;
use traceline_core::ScrollTuning;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scroll: ScrollSection,
    pub ui: UiSection,
    pub playback: PlaybackSection,
}

/// Scroll sensitivity, in terminal rows (the host's pixel unit)
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScrollSection {
    pub wheel_threshold: f32,
    pub deadzone: f32,
    pub max_step_per_event: i32,
    pub line_height: f32,
    pub bottom_padding: f32,
}

impl Default for ScrollSection {
    fn default() -> Self {
        Self {
            wheel_threshold: 9.0,
            deadzone: 0.5,
            max_step_per_event: 3,
            line_height: 1.0,
            bottom_padding: 2.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSection {
    /// "dark" or "light"
    pub theme_mode: String,
    pub scrollbar: bool,
    pub case_panel: bool,
}

impl Default for UiSection {
    fn default() -> Self {
        Self {
            theme_mode: "dark".to_string(),
            scrollbar: true,
            case_panel: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSection {
    /// Animate navigation; when false every commit snaps
    pub animation: bool,
    pub stiffness: f32,
    pub damping: f32,
}

impl Default for PlaybackSection {
    fn default() -> Self {
        Self {
            animation: true,
            stiffness: 260.0,
            damping: 30.0,
        }
    }
}

impl Config {
    /// Load from the user config file; any missing or unparsable file falls
    /// back to defaults.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        let Ok(raw) = std::fs::read_to_string(&path) else {
            return Self::default();
        };
        match toml::from_str(&raw) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("traceline: ignoring invalid config ({err})");
                Self::default()
            }
        }
    }

    fn config_path() -> Option<PathBuf> {
        Some(dirs::config_dir()?.join("traceline").join("config.toml"))
    }

    pub fn is_light_mode(&self) -> bool {
        self.ui.theme_mode.eq_ignore_ascii_case("light")
    }

    /// Map the config sections onto the core's tuning constants.
    pub fn tuning(&self) -> ScrollTuning {
        ScrollTuning {
            wheel_threshold_px: self.scroll.wheel_threshold,
            deadzone_px: self.scroll.deadzone,
            max_step_per_event: self.scroll.max_step_per_event,
            line_height_px: self.scroll.line_height,
            content_bottom_padding_px: self.scroll.bottom_padding,
            stiffness: self.playback.stiffness,
            damping: self.playback.damping,
            ..ScrollTuning::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tuning_validates() {
        assert!(Config::default().tuning().validate().is_ok());
    }

    #[test]
    fn test_parse_partial_config() {
        let config: Config = toml::from_str(
            r#"
            [scroll]
            wheel_threshold = 12.0

            [ui]
            theme_mode = "light"
            "#,
        )
        .expect("config should parse");
        assert_eq!(config.scroll.wheel_threshold, 12.0);
        assert_eq!(config.scroll.max_step_per_event, 3);
        assert!(config.is_light_mode());
        assert!(config.playback.animation);
    }

    #[test]
    fn test_tuning_carries_overrides() {
        let config: Config = toml::from_str(
            r#"
            [playback]
            stiffness = 170.0
            damping = 26.0
            "#,
        )
        .expect("config should parse");
        let tuning = config.tuning();
        assert_eq!(tuning.stiffness, 170.0);
        assert_eq!(tuning.damping, 26.0);
        // untouched constants keep the core defaults
        assert_eq!(tuning.reanchor_tolerance_px, 2.0);
        assert_eq!(tuning.wheel_active_ms, 180);
    }
}

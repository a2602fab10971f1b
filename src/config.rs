//! Loop configuration.
//!
//! Defaults cover the common case; the binary overrides fields from command-line flags. With
//! the `config` feature enabled, a TOML file can supply the same fields:
//!
//! ```toml
//! refresh_rate_hz = 30
//! input_poll_interval_ms = 2
//! max_frames = 600
//! mouse_capture = false
//!
//! [initial_viewport]
//! width = 1024
//! height = 768
//! ```

use crate::error::{FramefeedError, Result};
use crate::frame::ViewportSize;
use crate::render::LoopOptions;
use std::time::Duration;

pub const DEFAULT_REFRESH_RATE_HZ: u32 = 60;
pub const DEFAULT_INPUT_POLL_INTERVAL_MS: u64 = 4;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "config", serde(default, deny_unknown_fields))]
pub struct LoopConfig {
    /// Refresh ticks per second.
    pub refresh_rate_hz: u32,
    /// Size handed to the engine at startup; `None` asks the host, then falls back to 800x600.
    pub initial_viewport: Option<ViewportSize>,
    /// How long the input thread blocks waiting for a terminal event.
    pub input_poll_interval_ms: u64,
    /// Stop after this many frames; `None` runs until quit.
    pub max_frames: Option<u64>,
    pub mouse_capture: bool,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            refresh_rate_hz: DEFAULT_REFRESH_RATE_HZ,
            initial_viewport: None,
            input_poll_interval_ms: DEFAULT_INPUT_POLL_INTERVAL_MS,
            max_frames: None,
            mouse_capture: true,
        }
    }
}

impl LoopConfig {
    pub fn validate(&self) -> Result<()> {
        if self.refresh_rate_hz == 0 {
            return Err(FramefeedError::config("refresh rate must be at least 1 Hz"));
        }
        if self.input_poll_interval_ms == 0 {
            return Err(FramefeedError::config(
                "input poll interval must be at least 1 ms",
            ));
        }
        if self.max_frames == Some(0) {
            return Err(FramefeedError::config("max frames must be at least 1"));
        }
        Ok(())
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(1) / self.refresh_rate_hz.max(1)
    }

    pub fn input_poll_interval(&self) -> Duration {
        Duration::from_millis(self.input_poll_interval_ms)
    }

    pub fn loop_options(&self) -> LoopOptions {
        LoopOptions {
            refresh_interval: self.refresh_interval(),
            max_frames: self.max_frames,
        }
    }
}

#[cfg(feature = "config")]
impl LoopConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: LoopConfig = toml::from_str(contents)
            .map_err(|err| FramefeedError::config(format!("invalid config: {err}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &std::path::Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|err| {
            FramefeedError::io(format!("reading {}", path.display()), err)
        })?;
        Self::from_toml_str(&contents)
    }

    /// `<config_dir>/framefeed/config.toml`, if the platform has a config directory.
    pub fn default_path() -> Option<std::path::PathBuf> {
        dirs::config_dir().map(|dir| dir.join("framefeed").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = LoopConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.refresh_rate_hz, 60);
        assert_eq!(config.initial_viewport, None);
        assert!(config.mouse_capture);
    }

    #[test]
    fn refresh_interval_follows_rate() {
        let config = LoopConfig {
            refresh_rate_hz: 50,
            ..LoopConfig::default()
        };
        assert_eq!(config.refresh_interval(), Duration::from_millis(20));
        assert_eq!(config.loop_options().refresh_interval, Duration::from_millis(20));
    }

    #[test]
    fn zero_values_are_rejected() {
        let zero_rate = LoopConfig {
            refresh_rate_hz: 0,
            ..LoopConfig::default()
        };
        assert!(matches!(
            zero_rate.validate(),
            Err(FramefeedError::ConfigError { .. })
        ));

        let zero_poll = LoopConfig {
            input_poll_interval_ms: 0,
            ..LoopConfig::default()
        };
        assert!(zero_poll.validate().is_err());

        let zero_frames = LoopConfig {
            max_frames: Some(0),
            ..LoopConfig::default()
        };
        assert!(zero_frames.validate().is_err());
    }

    #[cfg(feature = "config")]
    #[test]
    fn parses_toml_with_partial_fields() {
        let config = LoopConfig::from_toml_str(
            r#"
            refresh_rate_hz = 30

            [initial_viewport]
            width = 1024
            height = 768
            "#,
        )
        .unwrap();

        assert_eq!(config.refresh_rate_hz, 30);
        assert_eq!(config.initial_viewport, Some(ViewportSize::new(1024, 768)));
        assert_eq!(config.input_poll_interval_ms, DEFAULT_INPUT_POLL_INTERVAL_MS);
    }

    #[cfg(feature = "config")]
    #[test]
    fn rejects_invalid_toml_values() {
        assert!(LoopConfig::from_toml_str("refresh_rate_hz = 0").is_err());
        assert!(LoopConfig::from_toml_str("unknown_field = true").is_err());
    }

    #[cfg(feature = "config")]
    #[test]
    fn loads_from_file() {
        let file = tempfile::NamedTempFile::new().expect("create temp file");
        std::fs::write(file.path(), "max_frames = 10\nmouse_capture = false\n").expect("write");

        let config = LoopConfig::load(file.path()).unwrap();
        assert_eq!(config.max_frames, Some(10));
        assert!(!config.mouse_capture);
    }
}

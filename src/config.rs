//! Timeline Configuration - Read-only timing constants
//!
//! Every duration the screen uses is injected through [`TimelineConfig`]
//! instead of being hard-coded in the listeners. Values are stored in
//! milliseconds so that delay arithmetic stays exact (`2 * (800 + 50)` is
//! exactly 1700ms, no float drift).
//!
//! # Example
//!
//! ```ignore
//! use spark_kinetic::config::TimelineConfig;
//!
//! // Defaults give the 8-second loop
//! let config = TimelineConfig::default();
//!
//! // Partial overrides from TOML, everything else keeps its default
//! let config = TimelineConfig::from_toml_str("total_seconds = 12")?;
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

// =============================================================================
// ERRORS
// =============================================================================

/// Errors raised while loading or validating a [`TimelineConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config syntax")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

// =============================================================================
// CONFIG
// =============================================================================

/// Timing constants for the whole screen.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimelineConfig {
    /// Clock period (default: 1000ms)
    pub tick_period_ms: u64,
    /// Seconds in one loop; the counter walks 1..=total (default: 8)
    pub total_seconds: u8,
    /// Fade duration of one character (default: 300ms)
    pub char_duration_ms: u64,
    /// Delay between consecutive characters of a title word (default: 100ms)
    pub char_delay_ms: u64,
    /// Delay between consecutive subtitle characters (default: 40ms)
    pub subtitle_char_delay_ms: u64,
    /// Per-character delay of the lead subtitle (default: 400ms)
    pub lead_subtitle_char_delay_ms: u64,
    /// Duration of one lift-up shift (default: 800ms)
    pub lift_duration_ms: u64,
    /// Pause between two lift-up shifts (default: 50ms)
    pub lift_gap_ms: u64,
    /// Orb rotation and flip duration (default: 2000ms)
    pub step_duration_ms: u64,
    /// Slide-in duration of the title phrase (default: 1000ms)
    pub title_slide_ms: u64,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            tick_period_ms: 1000,
            total_seconds: 8,
            char_duration_ms: 300,
            char_delay_ms: 100,
            subtitle_char_delay_ms: 40,
            lead_subtitle_char_delay_ms: 400,
            lift_duration_ms: 800,
            lift_gap_ms: 50,
            step_duration_ms: 2000,
            title_slide_ms: 1000,
        }
    }
}

impl TimelineConfig {
    /// Parse a TOML document. Missing keys fall back to their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Reject values the clock cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_period_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "tick_period_ms",
                reason: "must be greater than zero",
            });
        }
        if self.total_seconds == 0 {
            return Err(ConfigError::Invalid {
                field: "total_seconds",
                reason: "must be greater than zero",
            });
        }
        Ok(())
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }

    pub fn char_duration(&self) -> Duration {
        Duration::from_millis(self.char_duration_ms)
    }

    pub fn char_delay(&self) -> Duration {
        Duration::from_millis(self.char_delay_ms)
    }

    pub fn subtitle_char_delay(&self) -> Duration {
        Duration::from_millis(self.subtitle_char_delay_ms)
    }

    pub fn lead_subtitle_char_delay(&self) -> Duration {
        Duration::from_millis(self.lead_subtitle_char_delay_ms)
    }

    pub fn lift_duration(&self) -> Duration {
        Duration::from_millis(self.lift_duration_ms)
    }

    pub fn lift_gap(&self) -> Duration {
        Duration::from_millis(self.lift_gap_ms)
    }

    pub fn step_duration(&self) -> Duration {
        Duration::from_millis(self.step_duration_ms)
    }

    pub fn title_slide(&self) -> Duration {
        Duration::from_millis(self.title_slide_ms)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TimelineConfig::default();
        assert_eq!(config.tick_period(), Duration::from_secs(1));
        assert_eq!(config.total_seconds, 8);
        assert_eq!(config.char_duration(), Duration::from_millis(300));
        assert_eq!(config.char_delay(), Duration::from_millis(100));
        assert_eq!(config.subtitle_char_delay(), Duration::from_millis(40));
        assert_eq!(config.lift_duration() + config.lift_gap(), Duration::from_millis(850));
        assert_eq!(config.step_duration(), Duration::from_secs(2));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = TimelineConfig::from_toml_str("total_seconds = 12\nlift_gap_ms = 10").unwrap();
        assert_eq!(config.total_seconds, 12);
        assert_eq!(config.lift_gap_ms, 10);
        assert_eq!(config.char_delay_ms, 100);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = TimelineConfig::from_toml_str("").unwrap();
        assert_eq!(config, TimelineConfig::default());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = TimelineConfig::from_toml_str("tick_rate = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_zero_values_rejected() {
        let err = TimelineConfig::from_toml_str("tick_period_ms = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "tick_period_ms", .. }));

        let err = TimelineConfig::from_toml_str("total_seconds = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "total_seconds", .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = TimelineConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}

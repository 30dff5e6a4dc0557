//! Controller configuration: `[shared]`, `[building]` and `[timing]`.

use std::path::Path;
use std::time::Duration;

use lift_common::building::Building;
use lift_common::config::{ConfigError, ConfigLoader, SharedConfig, Validate};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Simulated durations in milliseconds.
///
/// # TOML Example
///
/// ```toml
/// [timing]
/// tick_ms = 1000
/// travel_ms = 1500
/// door_dwell_ms = 1500
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimingConfig {
    /// Pause between driver ticks.
    pub tick_ms: u64,
    /// Travel time for one floor.
    pub travel_ms: u64,
    /// Door opening, open dwell and closing, each.
    pub door_dwell_ms: u64,
    /// Settling time after the car stops at a floor.
    pub arrival_ms: u64,
    pub bell_ms: u64,
    /// Pause after releasing an emergency mode.
    pub release_ms: u64,
    /// Back-off while waiting for a prompt answer.
    pub input_poll_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            tick_ms: 1000,
            travel_ms: 1500,
            door_dwell_ms: 1500,
            arrival_ms: 2500,
            bell_ms: 1000,
            release_ms: 1500,
            input_poll_ms: 250,
        }
    }
}

impl TimingConfig {
    #[inline]
    pub const fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    #[inline]
    pub const fn input_poll(&self) -> Duration {
        Duration::from_millis(self.input_poll_ms)
    }
}

impl Validate for TimingConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_ms == 0 {
            return Err(ConfigError::ValidationError("tick_ms must be > 0".to_string()));
        }
        if self.input_poll_ms == 0 {
            return Err(ConfigError::ValidationError(
                "input_poll_ms must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Full controller configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LiftConfig {
    pub shared: SharedConfig,
    #[serde(default)]
    pub building: Building,
    #[serde(default)]
    pub timing: TimingConfig,
}

impl Validate for LiftConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.shared.validate()?;
        self.building.validate()?;
        self.timing.validate()
    }
}

impl LiftConfig {
    /// Load and validate `path`; a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match Self::load_validated(path) {
            Err(ConfigError::FileNotFound) => {
                info!(path = %path.display(), "config file not found, using defaults");
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Render as TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

// ─── Tests ──────────────────────────────────────────────────────────

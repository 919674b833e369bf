//! Configuration type definitions
//!
//! These types represent the alert configuration. The firmware embeds an
//! `alert.toml` file; the build script deserializes the same file into
//! [`AlertConfig`] through serde to reject bad values at compile time.

use crate::detect::light::DEFAULT_LIGHT_THRESHOLD;
use crate::detect::motion::{DEFAULT_ACC_THRESHOLD, DEFAULT_GYRO_THRESHOLD};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default buzz phase length
pub const DEFAULT_BUZZ_DURATION_MS: u32 = 2000;

/// Default silent phase length
pub const DEFAULT_WAIT_DURATION_MS: u32 = 4000;

/// Default poll period
pub const DEFAULT_POLL_PERIOD_MS: u32 = 250;

/// Default buzzer tone (C7)
pub const DEFAULT_TONE_HZ: u16 = 2093;

/// Default length of a whole alert cycle in cycle mode
pub const DEFAULT_CYCLE_DURATION_MS: u32 = 16_000;

/// Alert behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AlertMode {
    /// Motion arms, a light change starts the alert, a second light
    /// change silences it
    #[default]
    Staged,
    /// Any change starts the alert, which runs buzz/wait phases until the
    /// cycle duration runs out
    Cycle,
}

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Poll period must be non-zero
    ZeroPollPeriod,
    /// Buzz and wait phases must be non-zero
    ZeroDuration,
    /// Tone frequency must be non-zero
    ZeroToneFrequency,
    /// Thresholds cannot be negative
    NegativeThreshold,
    /// Cycle must fit at least one buzz and one wait phase
    CycleTooShort,
}

/// Alert tunables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct AlertConfig {
    /// Alert behavior
    pub mode: AlertMode,
    /// Light step threshold (centilux)
    pub light_threshold: u32,
    /// Gyro threshold per axis (centi-°/s)
    pub gyro_threshold: i32,
    /// Allowed accel magnitude deviation from 1 g (centi-g)
    pub acc_threshold: i32,
    /// Buzz phase length (ms)
    pub buzz_duration_ms: u32,
    /// Silent phase length (ms)
    pub wait_duration_ms: u32,
    /// Poll tick period (ms)
    pub poll_period_ms: u32,
    /// Buzzer tone (Hz)
    pub tone_hz: u16,
    /// Whole alert length in cycle mode (ms)
    pub cycle_duration_ms: u32,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            mode: AlertMode::Staged,
            light_threshold: DEFAULT_LIGHT_THRESHOLD,
            gyro_threshold: DEFAULT_GYRO_THRESHOLD,
            acc_threshold: DEFAULT_ACC_THRESHOLD,
            buzz_duration_ms: DEFAULT_BUZZ_DURATION_MS,
            wait_duration_ms: DEFAULT_WAIT_DURATION_MS,
            poll_period_ms: DEFAULT_POLL_PERIOD_MS,
            tone_hz: DEFAULT_TONE_HZ,
            cycle_duration_ms: DEFAULT_CYCLE_DURATION_MS,
        }
    }
}

impl AlertConfig {
    /// Check the configuration for values the controller cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_period_ms == 0 {
            return Err(ConfigError::ZeroPollPeriod);
        }

        if self.buzz_duration_ms == 0 || self.wait_duration_ms == 0 {
            return Err(ConfigError::ZeroDuration);
        }

        if self.tone_hz == 0 {
            return Err(ConfigError::ZeroToneFrequency);
        }

        if self.gyro_threshold < 0 || self.acc_threshold < 0 {
            return Err(ConfigError::NegativeThreshold);
        }

        if self.mode == AlertMode::Cycle {
            let phases = self.buzz_duration_ms.saturating_add(self.wait_duration_ms);
            if self.cycle_duration_ms < phases {
                return Err(ConfigError::CycleTooShort);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AlertConfig::default();
        assert_eq!(config.mode, AlertMode::Staged);
        assert_eq!(config.light_threshold, 30_000);
        assert_eq!(config.gyro_threshold, 5000);
        assert_eq!(config.acc_threshold, 30);
        assert_eq!(config.buzz_duration_ms, 2000);
        assert_eq!(config.wait_duration_ms, 4000);
        assert_eq!(config.poll_period_ms, 250);
        assert_eq!(config.tone_hz, 2093);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_zero_values_rejected() {
        let config = AlertConfig {
            poll_period_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroPollPeriod));

        let config = AlertConfig {
            wait_duration_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroDuration));

        let config = AlertConfig {
            tone_hz: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroToneFrequency));
    }

    #[test]
    fn test_negative_threshold_rejected() {
        let config = AlertConfig {
            acc_threshold: -1,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NegativeThreshold));
    }

    #[test]
    fn test_cycle_length_only_checked_in_cycle_mode() {
        let mut config = AlertConfig {
            cycle_duration_ms: 5000,
            ..Default::default()
        };
        assert_eq!(config.validate(), Ok(()));

        config.mode = AlertMode::Cycle;
        assert_eq!(config.validate(), Err(ConfigError::CycleTooShort));

        config.cycle_duration_ms = 6000;
        assert_eq!(config.validate(), Ok(()));
    }
}

//! Simple TOML parser for alert configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! `alert.toml`. It does NOT support the full TOML spec.
//!
//! Supported features:
//! - A single `[alert]` section
//! - Key = value pairs (string, integer with `_` separators)
//! - Comments (# ...)
//!
//! Keys that are not listed keep their default value.

use heapless::Vec;

use super::types::{AlertConfig, AlertMode, ConfigError};

/// Number of recognized keys
const KEY_COUNT: usize = 9;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Invalid or unknown section header
    InvalidSection,
    /// Line is not `key = value`
    InvalidLine,
    /// Key outside of any section
    MissingSection,
    /// Key not recognized
    UnknownKey,
    /// Key set twice
    DuplicateKey,
    /// Invalid value type or out of range
    InvalidValue,
    /// Values parsed but the configuration is unusable
    Invalid(ConfigError),
}

impl From<ConfigError> for ParseError {
    fn from(e: ConfigError) -> Self {
        ParseError::Invalid(e)
    }
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Alert,
}

/// Recognized keys in the `[alert]` section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Key {
    Mode,
    LightThreshold,
    GyroThreshold,
    AccThreshold,
    BuzzDuration,
    WaitDuration,
    PollPeriod,
    ToneHz,
    CycleDuration,
}

impl Key {
    fn from_name(name: &str) -> Option<Self> {
        let key = match name {
            "mode" => Key::Mode,
            "light_threshold" => Key::LightThreshold,
            "gyro_threshold" => Key::GyroThreshold,
            "acc_threshold" => Key::AccThreshold,
            "buzz_duration_ms" => Key::BuzzDuration,
            "wait_duration_ms" => Key::WaitDuration,
            "poll_period_ms" => Key::PollPeriod,
            "tone_hz" => Key::ToneHz,
            "cycle_duration_ms" => Key::CycleDuration,
            _ => return None,
        };
        Some(key)
    }
}

/// Parse TOML configuration into a validated AlertConfig
pub fn parse_config(input: &str) -> Result<AlertConfig, ParseError> {
    let mut config = AlertConfig::default();
    let mut section = Section::Root;
    let mut seen: Vec<Key, KEY_COUNT> = Vec::new();

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Check for section header
        if line.starts_with('[') {
            section = parse_section_header(line)?;
            continue;
        }

        let (name, value) = parse_key_value(line).ok_or(ParseError::InvalidLine)?;

        if section != Section::Alert {
            return Err(ParseError::MissingSection);
        }

        let key = Key::from_name(name).ok_or(ParseError::UnknownKey)?;
        if seen.contains(&key) {
            return Err(ParseError::DuplicateKey);
        }
        // Capacity matches the number of keys, so this cannot overflow
        let _ = seen.push(key);

        apply_value(&mut config, key, value)?;
    }

    config.validate()?;
    Ok(config)
}

/// Parse a section header like `[alert]`, allowing a trailing comment
fn parse_section_header(line: &str) -> Result<Section, ParseError> {
    let line = strip_comment(line);
    let header = line
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or(ParseError::InvalidSection)?;

    match header.trim() {
        "alert" => Ok(Section::Alert),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = strip_comment(line[eq_pos + 1..].trim());

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Remove an inline comment that is not inside a string
fn strip_comment(value: &str) -> &str {
    match value.find('#') {
        Some(hash_pos) if value[..hash_pos].matches('"').count() % 2 == 0 => {
            value[..hash_pos].trim()
        }
        _ => value.trim(),
    }
}

/// Store one value into the config
fn apply_value(config: &mut AlertConfig, key: Key, value: &str) -> Result<(), ParseError> {
    match key {
        Key::Mode => config.mode = parse_mode(value)?,
        Key::LightThreshold => config.light_threshold = parse_int(value)?,
        Key::GyroThreshold => config.gyro_threshold = parse_int(value)?,
        Key::AccThreshold => config.acc_threshold = parse_int(value)?,
        Key::BuzzDuration => config.buzz_duration_ms = parse_int(value)?,
        Key::WaitDuration => config.wait_duration_ms = parse_int(value)?,
        Key::PollPeriod => config.poll_period_ms = parse_int(value)?,
        Key::ToneHz => config.tone_hz = parse_int(value)?,
        Key::CycleDuration => config.cycle_duration_ms = parse_int(value)?,
    }
    Ok(())
}

/// Parse a quoted string value
fn parse_string(value: &str) -> Result<&str, ParseError> {
    value
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .ok_or(ParseError::InvalidValue)
}

/// Parse the alert mode name
fn parse_mode(value: &str) -> Result<AlertMode, ParseError> {
    match parse_string(value)? {
        "staged" => Ok(AlertMode::Staged),
        "cycle" => Ok(AlertMode::Cycle),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Parse an integer value, ignoring `_` digit separators
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    let mut digits: heapless::String<24> = heapless::String::new();
    for c in value.chars().filter(|c| *c != '_') {
        digits.push(c).map_err(|_| ParseError::InvalidValue)?;
    }
    digits.parse().map_err(|_| ParseError::InvalidValue)
}

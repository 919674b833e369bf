//! Configuration loading
//!
//! The alert configuration is compiled into the firmware from alert.toml.
//! build.rs has already rejected a bad file, so the runtime parse only
//! fails if the parser and the build check disagree; in that case the
//! defaults are used.

use defmt::*;

use vigil_core::config::{parse_config, AlertConfig};

/// Embedded configuration (edit alert.toml and rebuild to customize)
const EMBEDDED_CONFIG: &str = include_str!("../alert.toml");

/// Parse the embedded configuration, falling back to defaults
pub fn load_config() -> AlertConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            log_config_summary(&config);
            config
        }
        Err(e) => {
            error!("Failed to parse alert.toml: {:?}, using defaults", e);
            AlertConfig::default()
        }
    }
}

/// Log a summary of the loaded configuration
fn log_config_summary(config: &AlertConfig) {
    info!("Configuration loaded ({:?} mode)", config.mode);
    debug!(
        "  thresholds: light={} gyro={} acc={}",
        config.light_threshold, config.gyro_threshold, config.acc_threshold
    );
    debug!(
        "  phases: buzz={}ms wait={}ms cycle={}ms",
        config.buzz_duration_ms, config.wait_duration_ms, config.cycle_duration_ms
    );
    debug!(
        "  poll={}ms tone={}Hz",
        config.poll_period_ms, config.tone_hz
    );
}

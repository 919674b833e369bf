//! Board-agnostic core logic for the Vigil alert firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Sensor reading types (light, 6-axis motion)
//! - Significance detectors for motion and light
//! - Alert state machine and its tick-driven controller
//! - Hardware abstraction traits (light sensor, motion sensor, buzzer)
//! - Configuration types and the `alert.toml` parser

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod controller;
pub mod detect;
pub mod reading;
pub mod state;
pub mod traits;

pub use controller::{AlertController, Evaluation, PhaseTimer};
pub use reading::{LightReading, MotionReading, SensorReading};
pub use state::{AlertState, Event};

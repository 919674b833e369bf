//! Hardware abstraction traits
//!
//! These traits define the interface between the alert logic
//! and hardware-specific implementations.

pub mod buzzer;
pub mod sensor;

pub use buzzer::{Buzzer, BuzzerCommand, BuzzerError};
pub use sensor::{LightSensor, MotionSensor, SensorError};

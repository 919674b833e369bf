//! Light and motion sensor traits

use crate::reading::{LightReading, MotionReading};

/// Errors that can occur while talking to a sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Bus transaction failed
    Bus,
    /// Device did not identify itself as expected
    NotResponding,
    /// Device has not been initialized
    NotConfigured,
}

/// Trait for single-shot ambient light sensors
///
/// The sensor converts once and then goes idle; every consumed result
/// must be followed by a new conversion request. Both happen inside
/// [`read_and_rearm`](LightSensor::read_and_rearm) so callers cannot forget
/// the second half.
pub trait LightSensor {
    /// Take the pending conversion result and start the next conversion
    ///
    /// Returns [`LightReading::NotReady`] while a conversion is still
    /// running.
    fn read_and_rearm(&mut self) -> Result<LightReading, SensorError>;
}

/// Trait for 6-axis motion sensors (gyroscope + accelerometer)
pub trait MotionSensor {
    /// Read all six axes in driver fixed-point units
    ///
    /// Takes `&mut self` because bus reads require mutable access.
    fn read_motion(&mut self) -> Result<MotionReading, SensorError>;
}

//! Sensor reading snapshots
//!
//! One [`SensorReading`] is captured per poll tick and handed to the
//! controller. Values are kept in the sensor drivers' integer fixed-point
//! units so threshold comparisons never touch floating point.

/// Sentinel stored in a motion baseline before the first reading
pub const NO_READING: i32 = i32::MIN;

/// Nominal accelerometer magnitude at rest (1 g in centi-g)
pub const REST_MAGNITUDE: i32 = 100;

/// Ambient light sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LightReading {
    /// Light intensity in centilux (1/100 lux)
    Centilux(u32),
    /// Conversion still running or the sensor is warming up
    NotReady,
}

impl LightReading {
    /// Intensity in centilux, if the reading is valid
    pub fn centilux(&self) -> Option<u32> {
        match self {
            LightReading::Centilux(value) => Some(*value),
            LightReading::NotReady => None,
        }
    }
}

/// 6-axis motion sample
///
/// Gyro axes are in centi-degrees per second, accelerometer axes in centi-g.
/// `magnitude` is the truncated Euclidean norm of the accelerometer vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionReading {
    pub gyro_x: i32,
    pub gyro_y: i32,
    pub gyro_z: i32,
    pub acc_x: i32,
    pub acc_y: i32,
    pub acc_z: i32,
    pub magnitude: i32,
}

impl MotionReading {
    /// Baseline placeholder used before the first sample arrives
    pub const UNSET: Self = Self {
        gyro_x: NO_READING,
        gyro_y: NO_READING,
        gyro_z: NO_READING,
        acc_x: NO_READING,
        acc_y: NO_READING,
        acc_z: NO_READING,
        magnitude: NO_READING,
    };

    /// Build a reading from raw axis values, deriving the accel magnitude
    pub fn new(gyro: [i32; 3], acc: [i32; 3]) -> Self {
        Self {
            gyro_x: gyro[0],
            gyro_y: gyro[1],
            gyro_z: gyro[2],
            acc_x: acc[0],
            acc_y: acc[1],
            acc_z: acc[2],
            magnitude: accel_magnitude(acc[0], acc[1], acc[2]),
        }
    }

    /// Largest absolute gyro component
    pub fn max_gyro(&self) -> u32 {
        self.gyro_x
            .unsigned_abs()
            .max(self.gyro_y.unsigned_abs())
            .max(self.gyro_z.unsigned_abs())
    }

    /// Distance of the accel magnitude from the 1 g rest value
    pub fn magnitude_deviation(&self) -> u32 {
        self.magnitude.abs_diff(REST_MAGNITUDE)
    }
}

/// Integer accelerometer magnitude, `floor(sqrt(x² + y² + z²))`
///
/// Squares are summed in 64 bits so full-range axis values cannot overflow.
pub fn accel_magnitude(x: i32, y: i32, z: i32) -> i32 {
    let sum = (x as i64).pow(2) as u64 + (y as i64).pow(2) as u64 + (z as i64).pow(2) as u64;
    sum.isqrt().min(i32::MAX as u64) as i32
}

/// Snapshot of every sensor for one poll tick
///
/// `motion` is `None` when the motion sensor could not be read this tick.
/// The tick still runs so phase timers and the light detector keep working.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorReading {
    pub light: LightReading,
    pub motion: Option<MotionReading>,
}

impl SensorReading {
    pub fn new(light: LightReading, motion: MotionReading) -> Self {
        Self {
            light,
            motion: Some(motion),
        }
    }

    /// Snapshot for a tick whose motion read failed
    pub fn without_motion(light: LightReading) -> Self {
        Self {
            light,
            motion: None,
        }
    }
}

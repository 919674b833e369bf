//! InvenSense MPU-9250 motion sensor
//!
//! Only the gyroscope and accelerometer are used; the magnetometer stays
//! powered down behind the internal AK8963 bridge. Full-scale ranges are
//! left at ±250 °/s and ±2 g.

use embedded_hal::i2c::I2c;
use vigil_core::reading::MotionReading;
use vigil_core::traits::{MotionSensor, SensorError};

/// Default I2C address (AD0 low)
pub const MPU9250_ADDR: u8 = 0x68;

/// Register map
mod reg {
    pub const GYRO_CONFIG: u8 = 0x1B;
    pub const ACCEL_CONFIG: u8 = 0x1C;
    /// Start of the 14-byte accel/temp/gyro burst
    pub const ACCEL_XOUT_H: u8 = 0x3B;
    pub const PWR_MGMT_1: u8 = 0x6B;
    pub const WHO_AM_I: u8 = 0x75;
}

/// WHO_AM_I values of the MPU-9250 and MPU-9255
const WHO_AM_I_IDS: [u8; 2] = [0x71, 0x73];

/// Accelerometer sensitivity at ±2 g (LSB per g)
const ACCEL_LSB_PER_G: i32 = 16384;

/// Convert a raw accelerometer sample to centi-g
pub fn raw_to_centi_g(raw: i16) -> i32 {
    raw as i32 * 100 / ACCEL_LSB_PER_G
}

/// Convert a raw gyro sample to centi-degrees per second
///
/// The ±250 °/s range spans the full 16-bit value, so
/// `centi_dps = raw * 500 * 100 / 65536`.
pub fn raw_to_centi_dps(raw: i16) -> i32 {
    raw as i32 * 50_000 / 65_536
}

/// MPU-9250 driver
pub struct Mpu9250<I2C> {
    i2c: I2C,
    address: u8,
    configured: bool,
}

impl<I2C: I2c> Mpu9250<I2C> {
    /// Create a driver at the default address
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, MPU9250_ADDR)
    }

    /// Create a driver at a custom address (AD0 high: 0x69)
    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            configured: false,
        }
    }

    /// Verify the device, wake it and select the full-scale ranges
    pub fn init(&mut self) -> Result<(), SensorError> {
        let mut id = [0u8; 1];
        self.i2c
            .write_read(self.address, &[reg::WHO_AM_I], &mut id)
            .map_err(|_| SensorError::Bus)?;
        if !WHO_AM_I_IDS.contains(&id[0]) {
            return Err(SensorError::NotResponding);
        }

        // Clear SLEEP, internal oscillator
        self.write_register(reg::PWR_MGMT_1, 0x00)?;
        // ±250 °/s
        self.write_register(reg::GYRO_CONFIG, 0x00)?;
        // ±2 g
        self.write_register(reg::ACCEL_CONFIG, 0x00)?;

        self.configured = true;
        Ok(())
    }

    /// Release the bus
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), SensorError> {
        self.i2c
            .write(self.address, &[register, value])
            .map_err(|_| SensorError::Bus)
    }
}

impl<I2C: I2c> MotionSensor for Mpu9250<I2C> {
    fn read_motion(&mut self) -> Result<MotionReading, SensorError> {
        if !self.configured {
            return Err(SensorError::NotConfigured);
        }

        let mut raw = [0u8; 14];
        self.i2c
            .write_read(self.address, &[reg::ACCEL_XOUT_H], &mut raw)
            .map_err(|_| SensorError::Bus)?;

        let word = |i: usize| i16::from_be_bytes([raw[i], raw[i + 1]]);

        // raw[6..8] is the die temperature
        let acc = [
            raw_to_centi_g(word(0)),
            raw_to_centi_g(word(2)),
            raw_to_centi_g(word(4)),
        ];
        let gyro = [
            raw_to_centi_dps(word(8)),
            raw_to_centi_dps(word(10)),
            raw_to_centi_dps(word(12)),
        ];

        Ok(MotionReading::new(gyro, acc))
    }
}

//! TI OPT3001 ambient light sensor
//!
//! The sensor is run in single-shot mode: each conversion is requested
//! explicitly, and the conversion-ready flag in the configuration register
//! tells whether a fresh result is waiting. A result is encoded as a 4-bit
//! exponent and a 12-bit mantissa; `lux = 0.01 * 2^E * M`, which makes the
//! centilux value an integer shift.

use embedded_hal::i2c::I2c;
use vigil_core::reading::LightReading;
use vigil_core::traits::{LightSensor, SensorError};

/// Default I2C address (ADDR pin tied to GND)
pub const OPT3001_ADDR: u8 = 0x44;

/// Register map
mod reg {
    pub const RESULT: u8 = 0x00;
    pub const CONFIG: u8 = 0x01;
    pub const MANUFACTURER_ID: u8 = 0x7E;
}

/// "TI" in ASCII
const MANUFACTURER_TI: u16 = 0x5449;

/// Automatic full-scale range, 100 ms conversion, single shot, latched
const CONFIG_SINGLE_SHOT: u16 = 0xC210;

/// Conversion ready flag
const CONFIG_CRF: u16 = 0x0080;

/// Mode of conversion operation field; `00` is shutdown
const CONFIG_MODE_MASK: u16 = 0x0600;

/// Convert a raw result register value to centilux
pub fn raw_to_centilux(raw: u16) -> u32 {
    let exponent = (raw >> 12) & 0x000F;
    let mantissa = raw & 0x0FFF;
    (mantissa as u32) << exponent
}

/// OPT3001 driver
///
/// Reading CONFIG clears the conversion-ready flag, and the device drops
/// back to shutdown once a single-shot conversion completes. A conversion
/// request that failed on the bus, or a result lost to a failed read,
/// would otherwise leave nothing running; `pending` tracks whether a
/// request actually reached the device so the next read can issue a new one.
pub struct Opt3001<I2C> {
    i2c: I2C,
    address: u8,
    configured: bool,
    /// A conversion request was accepted and its result not yet consumed
    pending: bool,
}

impl<I2C: I2c> Opt3001<I2C> {
    /// Create a driver at the default address
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, OPT3001_ADDR)
    }

    /// Create a driver at a custom address (ADDR strapped to VDD/SDA/SCL)
    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            configured: false,
            pending: false,
        }
    }

    /// Check the manufacturer ID and request the first conversion
    pub fn init(&mut self) -> Result<(), SensorError> {
        let id = self.read_register(reg::MANUFACTURER_ID)?;
        if id != MANUFACTURER_TI {
            return Err(SensorError::NotResponding);
        }

        self.start_conversion()?;
        self.configured = true;
        Ok(())
    }

    /// Release the bus
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn start_conversion(&mut self) -> Result<(), SensorError> {
        self.write_register(reg::CONFIG, CONFIG_SINGLE_SHOT)?;
        self.pending = true;
        Ok(())
    }

    fn read_register(&mut self, register: u8) -> Result<u16, SensorError> {
        let mut buf = [0u8; 2];
        self.i2c
            .write_read(self.address, &[register], &mut buf)
            .map_err(|_| SensorError::Bus)?;
        Ok(u16::from_be_bytes(buf))
    }

    fn write_register(&mut self, register: u8, value: u16) -> Result<(), SensorError> {
        let [hi, lo] = value.to_be_bytes();
        self.i2c
            .write(self.address, &[register, hi, lo])
            .map_err(|_| SensorError::Bus)
    }
}

impl<I2C: I2c> LightSensor for Opt3001<I2C> {
    fn read_and_rearm(&mut self) -> Result<LightReading, SensorError> {
        if !self.configured {
            return Err(SensorError::NotConfigured);
        }

        if !self.pending {
            // Previous request never reached the device
            self.start_conversion()?;
            return Ok(LightReading::NotReady);
        }

        let config = self.read_register(reg::CONFIG)?;
        if config & CONFIG_CRF == 0 {
            if config & CONFIG_MODE_MASK == 0 {
                // Shut down with no result: the ready flag was already consumed
                self.start_conversion()?;
            }
            return Ok(LightReading::NotReady);
        }

        // The flag is cleared by the read above; this conversion is spent
        self.pending = false;
        let raw = self.read_register(reg::RESULT)?;

        // A failed request leaves `pending` clear and is retried next call
        let _ = self.start_conversion();
        Ok(LightReading::Centilux(raw_to_centilux(raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorKind, ErrorType, Operation};

    /// Register-level OPT3001 model
    ///
    /// Follows the datasheet: reading CONFIG clears CRF, and a finished
    /// single-shot conversion returns the mode field to shutdown.
    struct MockOpt3001 {
        manufacturer: u16,
        config: u16,
        result: u16,
        ready: bool,
        conversions: u32,
        fail: bool,
        /// Number of upcoming register writes to reject
        failed_writes: u32,
    }

    impl MockOpt3001 {
        fn new() -> Self {
            Self {
                manufacturer: MANUFACTURER_TI,
                config: 0xC810, // power-on default, shutdown
                result: 0,
                ready: false,
                conversions: 0,
                fail: false,
                failed_writes: 0,
            }
        }

        fn finish_conversion(&mut self, raw: u16) {
            self.result = raw;
            self.ready = true;
            self.config &= !CONFIG_MODE_MASK;
        }

        fn read_register(&mut self, register: u8) -> u16 {
            match register {
                reg::RESULT => self.result,
                reg::CONFIG => {
                    let value = if self.ready {
                        self.config | CONFIG_CRF
                    } else {
                        self.config
                    };
                    self.ready = false;
                    value
                }
                reg::MANUFACTURER_ID => self.manufacturer,
                _ => 0,
            }
        }

        fn write_register(&mut self, register: u8, value: u16) {
            if register == reg::CONFIG {
                self.config = value;
                self.ready = false;
                self.conversions += 1;
            }
        }
    }

    impl ErrorType for MockOpt3001 {
        type Error = ErrorKind;
    }

    impl I2c for MockOpt3001 {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            if self.fail || address != OPT3001_ADDR {
                return Err(ErrorKind::Other);
            }

            let mut pointer = reg::RESULT;
            for op in operations.iter_mut() {
                match op {
                    Operation::Write(bytes) => {
                        pointer = bytes[0];
                        if bytes.len() == 3 {
                            if self.failed_writes > 0 {
                                self.failed_writes -= 1;
                                return Err(ErrorKind::Other);
                            }
                            self.write_register(pointer, u16::from_be_bytes([bytes[1], bytes[2]]));
                        }
                    }
                    Operation::Read(buf) => {
                        let value = self.read_register(pointer).to_be_bytes();
                        buf.copy_from_slice(&value[..buf.len()]);
                    }
                }
            }
            Ok(())
        }
    }

    fn sensor() -> Opt3001<MockOpt3001> {
        let mut sensor = Opt3001::new(MockOpt3001::new());
        sensor.init().unwrap();
        sensor
    }

    #[test]
    fn test_raw_to_centilux() {
        assert_eq!(raw_to_centilux(0x0000), 0);
        // E = 0, M = 1: 0.01 lux
        assert_eq!(raw_to_centilux(0x0001), 1);
        // E = 3, M = 0x456 (1110): 88.80 lux
        assert_eq!(raw_to_centilux(0x3456), 8880);
        // Full scale: 83865.60 lux
        assert_eq!(raw_to_centilux(0xBFFF), 8_386_560);
    }

    #[test]
    fn test_init_configures_single_shot() {
        let sensor = sensor();
        let mock = sensor.release();
        assert_eq!(mock.config, CONFIG_SINGLE_SHOT);
        assert_eq!(mock.conversions, 1);
    }

    #[test]
    fn test_init_rejects_wrong_device() {
        let mut mock = MockOpt3001::new();
        mock.manufacturer = 0x1234;
        let mut sensor = Opt3001::new(mock);
        assert_eq!(sensor.init(), Err(SensorError::NotResponding));
        assert_eq!(sensor.read_and_rearm(), Err(SensorError::NotConfigured));
    }

    #[test]
    fn test_not_ready_does_not_rearm() {
        let mut sensor = sensor();
        assert_eq!(sensor.read_and_rearm(), Ok(LightReading::NotReady));
        assert_eq!(sensor.read_and_rearm(), Ok(LightReading::NotReady));
        assert_eq!(sensor.i2c.conversions, 1);
    }

    #[test]
    fn test_ready_result_is_read_then_rearmed() {
        let mut sensor = sensor();
        sensor.i2c.finish_conversion(0x3456);

        assert_eq!(sensor.read_and_rearm(), Ok(LightReading::Centilux(8880)));
        assert_eq!(sensor.i2c.conversions, 2);
        assert_eq!(sensor.i2c.config, CONFIG_SINGLE_SHOT);

        // Next tick sees the new conversion still running
        assert_eq!(sensor.read_and_rearm(), Ok(LightReading::NotReady));
        assert_eq!(sensor.i2c.conversions, 2);
    }

    #[test]
    fn test_failed_rearm_keeps_result_and_recovers() {
        let mut sensor = sensor();
        sensor.i2c.finish_conversion(0x3456);
        sensor.i2c.failed_writes = 1;

        // Result is still delivered although the new request was rejected
        assert_eq!(sensor.read_and_rearm(), Ok(LightReading::Centilux(8880)));
        assert_eq!(sensor.i2c.conversions, 1);

        // Next call issues the missing request
        assert_eq!(sensor.read_and_rearm(), Ok(LightReading::NotReady));
        assert_eq!(sensor.i2c.conversions, 2);

        sensor.i2c.finish_conversion(0x0001);
        assert_eq!(sensor.read_and_rearm(), Ok(LightReading::Centilux(1)));
    }

    #[test]
    fn test_consumed_ready_flag_restarts_conversion() {
        let mut sensor = sensor();
        sensor.i2c.finish_conversion(0x3456);

        // CONFIG read elsewhere (or a reply lost on the bus) cleared CRF
        sensor.i2c.read_register(reg::CONFIG);

        // Device is shut down with nothing to report, so a new request goes out
        assert_eq!(sensor.read_and_rearm(), Ok(LightReading::NotReady));
        assert_eq!(sensor.i2c.conversions, 2);

        sensor.i2c.finish_conversion(0x3456);
        assert_eq!(sensor.read_and_rearm(), Ok(LightReading::Centilux(8880)));
    }

    #[test]
    fn test_bus_error_then_recovery() {
        let mut sensor = sensor();
        sensor.i2c.fail = true;
        assert_eq!(sensor.read_and_rearm(), Err(SensorError::Bus));

        sensor.i2c.fail = false;
        sensor.i2c.finish_conversion(0x3456);
        assert_eq!(sensor.read_and_rearm(), Ok(LightReading::Centilux(8880)));
    }

    #[test]
    fn test_custom_address() {
        let mut sensor = Opt3001::with_address(MockOpt3001::new(), 0x45);
        assert_eq!(sensor.init(), Err(SensorError::Bus));
    }
}

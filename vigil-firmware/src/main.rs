//! Vigil - motion + light alert firmware
//!
//! Main firmware binary for RP2040-based wearables. A gyro/accelerometer
//! arms the alert, an ambient light change starts it, and a piezo buzzer
//! sounds in timed buzz/wait phases.
//!
//! Board wiring:
//! - OPT3001 light sensor on I2C0 (SDA GPIO4, SCL GPIO5)
//! - MPU-9250 motion sensor on I2C1 (SDA GPIO6, SCL GPIO7)
//! - Piezo buzzer on GPIO16 (PWM slice 0, channel A)

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::i2c::{Config as I2cConfig, I2c};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use {defmt_rtt as _, panic_probe as _};

use vigil_drivers::buzzer::ToneBuzzer;
use vigil_drivers::light::Opt3001;
use vigil_drivers::motion::Mpu9250;

mod config;
mod tasks;
mod tone;

/// I2C bus speed for both sensors
const I2C_FREQUENCY_HZ: u32 = 400_000;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Vigil firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load_config();

    let mut i2c_config = I2cConfig::default();
    i2c_config.frequency = I2C_FREQUENCY_HZ;

    // Light sensor
    let i2c0 = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c_config.clone());
    let mut light = Opt3001::new(i2c0);
    match light.init() {
        Ok(()) => info!("OPT3001 initialized"),
        // Light stays not ready and init is retried every tick
        Err(e) => error!("OPT3001 init failed: {:?}", e),
    }

    // Motion sensor
    let i2c1 = I2c::new_blocking(p.I2C1, p.PIN_7, p.PIN_6, i2c_config);
    let mut motion = Mpu9250::new(i2c1);
    match motion.init() {
        Ok(()) => info!("MPU-9250 initialized"),
        // Ticks run without motion and init is retried until the sensor answers
        Err(e) => error!("MPU-9250 init failed: {:?}", e),
    }

    // Buzzer
    let pwm = Pwm::new_output_a(p.PWM_SLICE0, p.PIN_16, PwmConfig::default());
    let buzzer = ToneBuzzer::new(tone::PwmTone::new(pwm));
    info!("Buzzer initialized");

    let devices = tasks::AlertPeripherals {
        light,
        motion,
        buzzer,
    };

    // Spawn tasks
    spawner.spawn(tasks::tick_task(config.poll_period_ms)).unwrap();
    spawner.spawn(tasks::alert_task(devices, config)).unwrap();

    info!("All tasks spawned, firmware running");
}

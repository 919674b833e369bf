//! Alert task
//!
//! Waits for each poll tick, takes a sensor snapshot, runs the controller
//! and applies the resulting buzzer command before the next tick. A sensor
//! that failed to initialize at boot is retried on every tick. A failed
//! read never skips the tick: the controller sees the snapshot without that
//! sample, so phase timers keep running.

use defmt::*;
use embassy_rp::i2c::{Blocking, I2c};
use embassy_rp::peripherals::{I2C0, I2C1};

use vigil_core::config::AlertConfig;
use vigil_core::traits::{LightSensor, MotionSensor, SensorError};
use vigil_core::{AlertController, LightReading, SensorReading};
use vigil_drivers::buzzer::ToneBuzzer;
use vigil_drivers::light::Opt3001;
use vigil_drivers::motion::Mpu9250;

use crate::tasks::tick::TICK_SIGNAL;
use crate::tone::PwmTone;

/// Devices owned by the alert task
pub struct AlertPeripherals {
    pub light: Opt3001<I2c<'static, I2C0, Blocking>>,
    pub motion: Mpu9250<I2c<'static, I2C1, Blocking>>,
    pub buzzer: ToneBuzzer<PwmTone>,
}

/// Alert task - one controller evaluation per tick
#[embassy_executor::task]
pub async fn alert_task(mut devices: AlertPeripherals, config: AlertConfig) {
    info!("Alert task started");

    let mut controller = AlertController::new(config);

    loop {
        let now_ms = TICK_SIGNAL.wait().await;

        let motion = match devices.motion.read_motion() {
            Ok(motion) => Some(motion),
            Err(SensorError::NotConfigured) => {
                if let Err(e) = devices.motion.init() {
                    warn!("MPU-9250 still not responding: {:?}", e);
                }
                None
            }
            Err(e) => {
                warn!("Motion read failed: {:?}", e);
                None
            }
        };

        let light = match devices.light.read_and_rearm() {
            Ok(light) => light,
            Err(SensorError::NotConfigured) => {
                if let Err(e) = devices.light.init() {
                    warn!("OPT3001 still not responding: {:?}", e);
                }
                LightReading::NotReady
            }
            Err(e) => {
                warn!("Light read failed: {:?}", e);
                LightReading::NotReady
            }
        };

        let reading = SensorReading { light, motion };
        debug!(
            "t={}ms light={:?} motion={:?}",
            now_ms, reading.light, reading.motion
        );

        let eval = controller.evaluate(&reading, now_ms);

        if eval.changed() {
            info!(
                "{:?} -> {:?} on {:?} at {}ms",
                eval.previous, eval.state, eval.event, now_ms
            );
        }

        if let Some(command) = eval.command {
            debug!("Buzzer: {:?}", command);
            if let Err(e) = command.apply(&mut devices.buzzer) {
                warn!("Buzzer rejected {:?}: {:?}", command, e);
            }
        }
    }
}

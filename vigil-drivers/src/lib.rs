//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in vigil-core for the wearable's peripherals:
//!
//! - Ambient light sensor (OPT3001, single-shot over I2C)
//! - Motion sensor (MPU-9250 gyro + accelerometer over I2C)
//! - Tone buzzer with start/stop pairing

#![no_std]
#![deny(unsafe_code)]

pub mod buzzer;
pub mod light;
pub mod motion;

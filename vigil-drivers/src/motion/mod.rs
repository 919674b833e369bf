//! Motion sensor drivers

pub mod mpu9250;

pub use mpu9250::Mpu9250;

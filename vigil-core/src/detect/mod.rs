//! Significance detectors
//!
//! Each detector keeps the last accepted sample as its baseline and reports
//! whether a new sample is a significant step change. Baselines follow every
//! valid sample, so slow drifts never add up to a detection.

pub mod light;
pub mod motion;

pub use light::LightDetector;
pub use motion::MotionDetector;

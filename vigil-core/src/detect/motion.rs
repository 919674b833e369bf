//! Motion significance detector
//!
//! Flags a sample when any gyro axis exceeds the rotation threshold or the
//! accelerometer magnitude strays too far from 1 g.

use crate::reading::{MotionReading, NO_READING};

/// Default gyro threshold (centi-degrees per second)
pub const DEFAULT_GYRO_THRESHOLD: i32 = 5000;

/// Default allowed deviation of the accel magnitude from 1 g (centi-g)
pub const DEFAULT_ACC_THRESHOLD: i32 = 30;

/// Stateful motion detector
#[derive(Debug, Clone)]
pub struct MotionDetector {
    gyro_threshold: i32,
    acc_threshold: i32,
    baseline: MotionReading,
}

impl Default for MotionDetector {
    fn default() -> Self {
        Self::new(DEFAULT_GYRO_THRESHOLD, DEFAULT_ACC_THRESHOLD)
    }
}

impl MotionDetector {
    /// Create a detector with no baseline
    pub fn new(gyro_threshold: i32, acc_threshold: i32) -> Self {
        Self {
            gyro_threshold,
            acc_threshold,
            baseline: MotionReading::UNSET,
        }
    }

    /// Previous sample, or [`MotionReading::UNSET`] before the first one
    pub fn baseline(&self) -> &MotionReading {
        &self.baseline
    }

    /// Check if the detector has seen a sample
    ///
    /// Only `gyro_x` is inspected; the other fields of the baseline are not
    /// validated.
    pub fn is_seeded(&self) -> bool {
        self.baseline.gyro_x != NO_READING
    }

    /// Classify a sample and make it the new baseline
    ///
    /// The first call after construction only seeds the baseline and
    /// reports no change.
    pub fn check(&mut self, reading: &MotionReading) -> bool {
        if !self.is_seeded() {
            self.baseline = *reading;
            return false;
        }

        let rotating = reading.max_gyro() > self.gyro_threshold.unsigned_abs();
        let jolted = reading.magnitude_deviation() > self.acc_threshold.unsigned_abs();

        self.baseline = *reading;
        rotating || jolted
    }

    /// Forget the baseline
    pub fn reset(&mut self) {
        self.baseline = MotionReading::UNSET;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn still() -> MotionReading {
        MotionReading::new([0, 0, 0], [0, 0, 100])
    }

    #[test]
    fn test_first_call_seeds() {
        let mut detector = MotionDetector::default();
        let violent = MotionReading::new([20000, 0, 0], [0, 0, 400]);

        assert!(!detector.check(&violent));
        assert!(detector.is_seeded());
        assert_eq!(detector.baseline(), &violent);
    }

    #[test]
    fn test_gyro_step() {
        let mut detector = MotionDetector::default();
        assert!(!detector.check(&still()));

        let spin = MotionReading::new([6000, 0, 0], [0, 0, 100]);
        assert!(detector.check(&spin));
    }

    #[test]
    fn test_gyro_threshold_is_exclusive() {
        let mut detector = MotionDetector::default();
        detector.check(&still());

        let edge = MotionReading::new([0, -5000, 5000], [0, 0, 100]);
        assert!(!detector.check(&edge));

        let over = MotionReading::new([0, -5001, 0], [0, 0, 100]);
        assert!(detector.check(&over));
    }

    #[test]
    fn test_acc_deviation() {
        let mut detector = MotionDetector::default();
        detector.check(&still());

        // Magnitude 130 is exactly 30 away from rest
        assert!(!detector.check(&MotionReading::new([0, 0, 0], [0, 0, 130])));
        assert!(detector.check(&MotionReading::new([0, 0, 0], [0, 0, 131])));
        // Free fall
        assert!(detector.check(&MotionReading::new([0, 0, 0], [0, 0, 0])));
    }

    #[test]
    fn test_baseline_follows_significant_samples() {
        let mut detector = MotionDetector::default();
        detector.check(&still());

        let spin = MotionReading::new([9000, 0, 0], [0, 0, 100]);
        assert!(detector.check(&spin));
        assert_eq!(detector.baseline(), &spin);
    }

    #[test]
    fn test_seeding_checks_gyro_x_only() {
        let mut detector = MotionDetector::default();

        // A sample carrying the sentinel in gyro_x leaves the detector unseeded
        let odd = MotionReading::new([NO_READING, 0, 0], [0, 0, 100]);
        assert!(!detector.check(&odd));
        assert!(!detector.is_seeded());

        // So the next sample is treated as a cold start again
        let spin = MotionReading::new([9000, 0, 0], [0, 0, 100]);
        assert!(!detector.check(&spin));
        assert!(detector.is_seeded());
    }

    #[test]
    fn test_reset() {
        let mut detector = MotionDetector::default();
        detector.check(&still());
        detector.reset();
        assert!(!detector.is_seeded());
        assert!(!detector.check(&MotionReading::new([9000, 0, 0], [0, 0, 100])));
    }
}

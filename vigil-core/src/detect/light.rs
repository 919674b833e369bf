//! Light significance detector
//!
//! Compares each valid light sample with the previous valid one. Samples
//! taken while the sensor is not ready are ignored and leave the baseline
//! untouched.

use crate::reading::LightReading;

/// Default light threshold in centilux (300 lux)
pub const DEFAULT_LIGHT_THRESHOLD: u32 = 30_000;

/// Stateful light detector
#[derive(Debug, Clone)]
pub struct LightDetector {
    threshold: u32,
    baseline: Option<u32>,
}

impl Default for LightDetector {
    fn default() -> Self {
        Self::new(DEFAULT_LIGHT_THRESHOLD)
    }
}

impl LightDetector {
    /// Create a detector with no baseline
    ///
    /// # Arguments
    /// - `threshold`: Minimum step in centilux that counts as significant
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold,
            baseline: None,
        }
    }

    /// Last valid sample in centilux
    pub fn baseline(&self) -> Option<u32> {
        self.baseline
    }

    /// Classify a sample
    ///
    /// - `NotReady`: no verdict, baseline unchanged
    /// - first valid sample: seeds the baseline, no verdict
    /// - otherwise: significant iff `|reading - baseline| > threshold`,
    ///   and the reading becomes the new baseline
    pub fn check(&mut self, reading: LightReading) -> bool {
        let LightReading::Centilux(value) = reading else {
            return false;
        };

        let significant = match self.baseline {
            Some(previous) => value.abs_diff(previous) > self.threshold,
            None => false,
        };

        self.baseline = Some(value);
        significant
    }

    /// Forget the baseline
    pub fn reset(&mut self) {
        self.baseline = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_valid_reading_seeds() {
        let mut detector = LightDetector::default();
        assert!(!detector.check(LightReading::Centilux(90_000)));
        assert_eq!(detector.baseline(), Some(90_000));
    }

    #[test]
    fn test_not_ready_is_ignored() {
        let mut detector = LightDetector::default();

        assert!(!detector.check(LightReading::NotReady));
        assert_eq!(detector.baseline(), None);

        detector.check(LightReading::Centilux(1_000));
        assert!(!detector.check(LightReading::NotReady));
        assert_eq!(detector.baseline(), Some(1_000));

        // Compared against the last good value, not the failed read
        assert!(detector.check(LightReading::Centilux(40_000)));
    }

    #[test]
    fn test_small_steps_never_accumulate() {
        let mut detector = LightDetector::default();
        detector.check(LightReading::Centilux(1_000));

        // 1000 -> 1000 -> 5000 with a 30000 threshold
        assert!(!detector.check(LightReading::Centilux(1_000)));
        assert!(!detector.check(LightReading::Centilux(5_000)));

        // Ten 20000-step increments never trip the 30000 threshold
        for i in 1..=10 {
            assert!(!detector.check(LightReading::Centilux(5_000 + i * 20_000)));
        }
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let mut detector = LightDetector::new(100);
        detector.check(LightReading::Centilux(1_000));
        assert!(!detector.check(LightReading::Centilux(1_100)));
        assert!(detector.check(LightReading::Centilux(999)));
    }

    #[test]
    fn test_darkening_is_significant() {
        let mut detector = LightDetector::default();
        detector.check(LightReading::Centilux(50_000));
        assert!(detector.check(LightReading::Centilux(10_000)));
        assert_eq!(detector.baseline(), Some(10_000));
    }
}

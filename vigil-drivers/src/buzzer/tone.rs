//! Tone buzzer
//!
//! Wraps a platform tone generator (a PWM slice on the RP2040) and enforces
//! that every start is matched by exactly one stop.

use vigil_core::traits::{Buzzer, BuzzerError};

/// Trait for platform tone generators
pub trait ToneOutput {
    /// Drive a square wave at `frequency_hz`
    fn set_tone(&mut self, frequency_hz: u16);

    /// Stop driving the output
    fn silence(&mut self);
}

/// Buzzer over a [`ToneOutput`]
pub struct ToneBuzzer<T> {
    output: T,
    /// Frequency of the tone currently playing
    frequency_hz: Option<u16>,
}

impl<T: ToneOutput> ToneBuzzer<T> {
    /// Create a silent buzzer
    pub fn new(mut output: T) -> Self {
        output.silence();
        Self {
            output,
            frequency_hz: None,
        }
    }

    /// Frequency of the current tone, if sounding
    pub fn frequency_hz(&self) -> Option<u16> {
        self.frequency_hz
    }
}

impl<T: ToneOutput> Buzzer for ToneBuzzer<T> {
    fn start(&mut self, frequency_hz: u16) -> Result<(), BuzzerError> {
        if self.frequency_hz.is_some() {
            return Err(BuzzerError::AlreadySounding);
        }

        self.output.set_tone(frequency_hz);
        self.frequency_hz = Some(frequency_hz);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), BuzzerError> {
        if self.frequency_hz.is_none() {
            return Err(BuzzerError::NotSounding);
        }

        self.output.silence();
        self.frequency_hz = None;
        Ok(())
    }

    fn is_sounding(&self) -> bool {
        self.frequency_hz.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockTone {
        frequency_hz: u16,
        starts: u32,
        silences: u32,
    }

    impl MockTone {
        fn new() -> Self {
            Self {
                frequency_hz: 0,
                starts: 0,
                silences: 0,
            }
        }
    }

    impl ToneOutput for MockTone {
        fn set_tone(&mut self, frequency_hz: u16) {
            self.frequency_hz = frequency_hz;
            self.starts += 1;
        }

        fn silence(&mut self) {
            self.frequency_hz = 0;
            self.silences += 1;
        }
    }

    #[test]
    fn test_starts_silent() {
        let buzzer = ToneBuzzer::new(MockTone::new());
        assert!(!buzzer.is_sounding());
        assert_eq!(buzzer.output.silences, 1);
    }

    #[test]
    fn test_start_stop() {
        let mut buzzer = ToneBuzzer::new(MockTone::new());

        buzzer.start(2093).unwrap();
        assert!(buzzer.is_sounding());
        assert_eq!(buzzer.frequency_hz(), Some(2093));
        assert_eq!(buzzer.output.frequency_hz, 2093);

        buzzer.stop().unwrap();
        assert!(!buzzer.is_sounding());
        assert_eq!(buzzer.output.frequency_hz, 0);
    }

    #[test]
    fn test_double_start_rejected() {
        let mut buzzer = ToneBuzzer::new(MockTone::new());
        buzzer.start(2093).unwrap();

        assert_eq!(buzzer.start(440), Err(BuzzerError::AlreadySounding));
        assert_eq!(buzzer.output.starts, 1);
        assert_eq!(buzzer.frequency_hz(), Some(2093));
    }

    #[test]
    fn test_stop_while_silent_rejected() {
        let mut buzzer = ToneBuzzer::new(MockTone::new());
        assert_eq!(buzzer.stop(), Err(BuzzerError::NotSounding));
        assert_eq!(buzzer.output.silences, 1);
    }
}

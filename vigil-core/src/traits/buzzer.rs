//! Buzzer trait and commands

/// Errors reported by a buzzer that enforces start/stop pairing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BuzzerError {
    /// `start` called while a tone is already playing
    AlreadySounding,
    /// `stop` called while silent
    NotSounding,
}

/// Trait for tone-generating buzzers
pub trait Buzzer {
    /// Start a continuous tone
    fn start(&mut self, frequency_hz: u16) -> Result<(), BuzzerError>;

    /// Silence the tone
    fn stop(&mut self) -> Result<(), BuzzerError>;

    /// Check if a tone is playing
    fn is_sounding(&self) -> bool;
}

/// Buzzer action requested by the controller for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BuzzerCommand {
    /// Start sounding at the given frequency
    Start { frequency_hz: u16 },
    /// Stop sounding
    Stop,
}

impl BuzzerCommand {
    /// Execute this command on a buzzer
    pub fn apply<B: Buzzer>(self, buzzer: &mut B) -> Result<(), BuzzerError> {
        match self {
            BuzzerCommand::Start { frequency_hz } => buzzer.start(frequency_hz),
            BuzzerCommand::Stop => buzzer.stop(),
        }
    }
}

//! State machine definition
//!
//! Buzzer behavior is a function of the current state and an event.
//!
//! ```text
//!          motion            light             buzz elapsed
//!  Idle ──────────► Interim ───────► Buzz ─────────────────► Wait
//!   ▲                                 │  ◄──────────────────  │
//!   │            light                │     wait elapsed      │
//!   └─────────────────────────────────┘                       │
//!   ▲                  cycle elapsed (cycle mode)             │
//!   └─────────────────────────────────────────────────────────┘
//! ```

use super::events::Event;

/// Alert states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlertState {
    /// Watching for motion
    #[default]
    Idle,
    /// Motion seen, watching for a light change
    Interim,
    /// Buzzer sounding
    Buzz,
    /// Buzzer silent between buzz phases
    Wait,
}

impl AlertState {
    /// Check if the buzzer should be sounding in this state
    pub fn buzzer_on(&self) -> bool {
        matches!(self, AlertState::Buzz)
    }

    /// Process an event and return the next state
    ///
    /// This is the core state transition logic.
    pub fn transition(self, event: Event) -> Self {
        use AlertState::*;
        use Event::*;

        match (self, event) {
            // Idle transitions
            (Idle, MotionDetected) => Interim,
            (Idle, ChangeDetected) => Buzz,

            // Interim transitions
            (Interim, LightChanged) => Buzz,

            // Buzz transitions
            (Buzz, BuzzElapsed) => Wait,
            (Buzz, LightChanged) => Idle,

            // Wait transitions
            (Wait, WaitElapsed) => Buzz,
            (Wait, CycleElapsed) => Idle,

            // Default: stay in current state
            _ => self,
        }
    }
}

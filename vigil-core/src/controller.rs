//! Alert controller
//!
//! Owns the alert state, both detectors and the phase timers. The poll
//! scheduler calls [`AlertController::evaluate`] once per tick with a fresh
//! [`SensorReading`] and the current time; the controller never schedules
//! itself. All mutation happens inside `evaluate`, so a test can drive it
//! with synthetic readings and an injected clock.
//!
//! Per tick, in order:
//! - Idle: motion detector (cycle mode: light and motion detectors)
//!   A tick without a motion sample runs normally with no motion verdict.
//! - Interim: light detector
//! - Buzz: buzz timer first, light detector only if the timer has not run out
//! - Wait: (cycle mode: cycle timer first) wait timer

use crate::config::{AlertConfig, AlertMode};
use crate::detect::{LightDetector, MotionDetector};
use crate::reading::SensorReading;
use crate::state::{AlertState, Event};
use crate::traits::BuzzerCommand;

/// Start time of a timed phase
///
/// Times are milliseconds on a free-running `u32` counter. Elapsed time is
/// computed with wrapping arithmetic so a counter wrap mid-phase is harmless.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhaseTimer {
    started_ms: u32,
}

impl PhaseTimer {
    /// Start a phase at `now_ms`
    pub fn start(now_ms: u32) -> Self {
        Self { started_ms: now_ms }
    }

    /// Time spent in the phase
    pub fn elapsed_ms(&self, now_ms: u32) -> u32 {
        now_ms.wrapping_sub(self.started_ms)
    }

    /// Check if the phase has lasted at least `duration_ms`
    pub fn has_elapsed(&self, now_ms: u32, duration_ms: u32) -> bool {
        self.elapsed_ms(now_ms) >= duration_ms
    }
}

/// Outcome of one controller tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Evaluation {
    /// State before the tick
    pub previous: AlertState,
    /// State after the tick
    pub state: AlertState,
    /// Event that fired, if any
    pub event: Option<Event>,
    /// Buzzer action to perform, if any
    pub command: Option<BuzzerCommand>,
}

impl Evaluation {
    fn hold(state: AlertState) -> Self {
        Self {
            previous: state,
            state,
            event: None,
            command: None,
        }
    }

    /// Check if the tick changed state
    pub fn changed(&self) -> bool {
        self.previous != self.state
    }
}

/// Tick-driven alert controller
#[derive(Debug, Clone)]
pub struct AlertController {
    config: AlertConfig,
    state: AlertState,
    motion: MotionDetector,
    light: LightDetector,
    /// Live only while in Buzz or Wait
    phase: Option<PhaseTimer>,
    /// Live from the start of an alert until it ends (cycle mode)
    cycle: Option<PhaseTimer>,
}

impl AlertController {
    /// Create a controller in the Idle state with cold detectors
    pub fn new(config: AlertConfig) -> Self {
        Self {
            config,
            state: AlertState::Idle,
            motion: MotionDetector::new(config.gyro_threshold, config.acc_threshold),
            light: LightDetector::new(config.light_threshold),
            phase: None,
            cycle: None,
        }
    }

    /// Get current state
    pub fn state(&self) -> AlertState {
        self.state
    }

    /// Get active configuration
    pub fn config(&self) -> &AlertConfig {
        &self.config
    }

    /// Get the motion detector (baseline diagnostics)
    pub fn motion_detector(&self) -> &MotionDetector {
        &self.motion
    }

    /// Get the light detector (baseline diagnostics)
    pub fn light_detector(&self) -> &LightDetector {
        &self.light
    }

    /// Timer of the current Buzz or Wait phase
    pub fn phase(&self) -> Option<PhaseTimer> {
        self.phase
    }

    /// Run one tick
    pub fn evaluate(&mut self, reading: &SensorReading, now_ms: u32) -> Evaluation {
        let event = match self.config.mode {
            AlertMode::Staged => self.staged_event(reading, now_ms),
            AlertMode::Cycle => self.cycle_event(reading, now_ms),
        };

        let previous = self.state;
        let Some(event) = event else {
            return Evaluation::hold(previous);
        };

        let next = previous.transition(event);
        let command = self.enter(previous, next, now_ms);
        self.state = next;

        Evaluation {
            previous,
            state: next,
            event: Some(event),
            command,
        }
    }

    /// Four-state flow: motion arms, light starts, light interrupts
    fn staged_event(&mut self, reading: &SensorReading, now_ms: u32) -> Option<Event> {
        match self.state {
            AlertState::Idle => self
                .motion_changed(reading)
                .then_some(Event::MotionDetected),
            AlertState::Interim => self.light.check(reading.light).then_some(Event::LightChanged),
            AlertState::Buzz => {
                if self.phase_elapsed(now_ms, self.config.buzz_duration_ms) {
                    Some(Event::BuzzElapsed)
                } else if self.light.check(reading.light) {
                    Some(Event::LightChanged)
                } else {
                    None
                }
            }
            AlertState::Wait => self
                .phase_elapsed(now_ms, self.config.wait_duration_ms)
                .then_some(Event::WaitElapsed),
        }
    }

    /// Three-state flow: any change starts a bounded buzz/wait cycle
    fn cycle_event(&mut self, reading: &SensorReading, now_ms: u32) -> Option<Event> {
        match self.state {
            AlertState::Idle => {
                // Both detectors run so both baselines advance every tick
                let light = self.light.check(reading.light);
                let motion = self.motion_changed(reading);
                (light || motion).then_some(Event::ChangeDetected)
            }
            AlertState::Buzz => self
                .phase_elapsed(now_ms, self.config.buzz_duration_ms)
                .then_some(Event::BuzzElapsed),
            AlertState::Wait => {
                let cycle = *self.cycle.get_or_insert(PhaseTimer::start(now_ms));
                if cycle.has_elapsed(now_ms, self.config.cycle_duration_ms) {
                    Some(Event::CycleElapsed)
                } else {
                    self.phase_elapsed(now_ms, self.config.wait_duration_ms)
                        .then_some(Event::WaitElapsed)
                }
            }
            // Not reachable in cycle mode
            AlertState::Interim => None,
        }
    }

    /// Motion verdict; a missing sample is not significant and leaves the
    /// baseline alone
    fn motion_changed(&mut self, reading: &SensorReading) -> bool {
        match &reading.motion {
            Some(motion) => self.motion.check(motion),
            None => false,
        }
    }

    /// Check the current phase timer, arming it at `now_ms` if missing
    fn phase_elapsed(&mut self, now_ms: u32, duration_ms: u32) -> bool {
        self.phase
            .get_or_insert(PhaseTimer::start(now_ms))
            .has_elapsed(now_ms, duration_ms)
    }

    /// Apply phase entry/exit side effects and return the buzzer action
    fn enter(&mut self, from: AlertState, to: AlertState, now_ms: u32) -> Option<BuzzerCommand> {
        match (from, to) {
            (AlertState::Idle, AlertState::Buzz) => {
                self.phase = Some(PhaseTimer::start(now_ms));
                self.cycle = Some(PhaseTimer::start(now_ms));
                Some(self.start_tone())
            }
            (_, AlertState::Buzz) => {
                self.phase = Some(PhaseTimer::start(now_ms));
                Some(self.start_tone())
            }
            (AlertState::Buzz, AlertState::Wait) => {
                self.phase = Some(PhaseTimer::start(now_ms));
                Some(BuzzerCommand::Stop)
            }
            (AlertState::Buzz, AlertState::Idle) => {
                self.phase = None;
                self.cycle = None;
                Some(BuzzerCommand::Stop)
            }
            (AlertState::Wait, AlertState::Idle) => {
                self.phase = None;
                self.cycle = None;
                None
            }
            _ => None,
        }
    }

    fn start_tone(&self) -> BuzzerCommand {
        BuzzerCommand::Start {
            frequency_hz: self.config.tone_hz,
        }
    }
}

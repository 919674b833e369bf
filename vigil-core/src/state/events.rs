//! Events that trigger state transitions

/// Events that can trigger state transitions
///
/// The controller produces at most one event per poll tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    // Detector events
    /// Motion detector reported a significant step
    MotionDetected,
    /// Light detector reported a significant step
    LightChanged,
    /// Either detector reported a significant step (cycle mode)
    ChangeDetected,

    // Phase timer events
    /// Buzz phase ran for its full duration
    BuzzElapsed,
    /// Wait phase ran for its full duration
    WaitElapsed,
    /// Whole alert cycle ran out (cycle mode)
    CycleElapsed,
}

//! Events that trigger state transitions

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Scheduler fired the display poll
    PollTriggered,
    /// Content writer has run and pushes are done
    PushComplete,
}

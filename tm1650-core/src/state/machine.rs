//! State machine definition

use super::events::Event;

/// Display driver states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Between poll cycles
    #[default]
    Idle,
    /// Mid poll cycle, pushing to the chip
    Updating,
}

impl State {
    /// Check if a new poll may start
    pub fn accepts_poll(&self) -> bool {
        matches!(self, State::Idle)
    }

    /// Check if a poll cycle is running
    pub fn is_updating(&self) -> bool {
        matches!(self, State::Updating)
    }

    /// Process an event and return the next state
    ///
    /// A poll trigger while updating leaves the state unchanged; the
    /// caller drops that trigger.
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use State::*;

        match (self, event) {
            (Idle, PollTriggered) => Updating,
            (Updating, PushComplete) => Idle,

            // Dropped trigger
            (Updating, PollTriggered) => Updating,
            // Nothing to complete
            (Idle, PushComplete) => Idle,
        }
    }
}

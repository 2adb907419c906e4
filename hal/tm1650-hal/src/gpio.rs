//! GPIO pin abstractions
//!
//! The two-wire bus drives both lines open-drain style: a line is pulled
//! low by switching the pin to an output at logic 0 and released by
//! switching it back to an input, letting the board pull-up take it high.
//! Implementations only need direction switching and a level read.

/// Logic level on a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Logic 0
    Low,
    /// Logic 1
    High,
}

impl Level {
    /// Check if this is logic 1
    pub fn is_high(self) -> bool {
        self == Level::High
    }

    /// Check if this is logic 0
    pub fn is_low(self) -> bool {
        self == Level::Low
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// Pin that can switch between output and input at runtime
///
/// Implementations should not touch pull resistors or interrupt
/// configuration; the board provides the pull-ups.
pub trait FlexPin {
    /// Switch to output and drive the given level
    fn set_output(&mut self, level: Level);

    /// Switch to input (high impedance)
    fn set_input(&mut self);

    /// Read the current line level
    fn read(&self) -> Level;

    /// Pull the line low
    fn pull_low(&mut self) {
        self.set_output(Level::Low);
    }

    /// Release the line so the pull-up takes it high
    fn release(&mut self) {
        self.set_input();
    }

    /// Check if the line reads high
    fn is_high(&self) -> bool {
        self.read().is_high()
    }

    /// Check if the line reads low
    fn is_low(&self) -> bool {
        self.read().is_low()
    }
}

impl<T: FlexPin + ?Sized> FlexPin for &mut T {
    fn set_output(&mut self, level: Level) {
        (**self).set_output(level);
    }

    fn set_input(&mut self) {
        (**self).set_input();
    }

    fn read(&self) -> Level {
        (**self).read()
    }
}

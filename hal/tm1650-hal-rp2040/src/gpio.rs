//! Open-drain bus lines and pin strings
//!
//! The TM1650 lines are pulled up on the panel. A line is pulled low by
//! driving the pin as an output at logic 0 and released by turning the
//! pin back into an input.

use embassy_rp::gpio::{AnyPin, Flex, Pull};
use embassy_rp::Peri;
use tm1650_hal::{FlexPin, Level};

/// Number of GPIO pins on RP2040
pub const GPIO_COUNT: u8 = 30;

/// Pin assignment parsed from config
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinSpec {
    /// GPIO number
    pub pin: u8,
    /// Enable the internal pull-up (panel without its own)
    pub pull_up: bool,
}

/// Parse a pin string from config
///
/// Supports formats:
/// - "gpio4" -> pin 4
/// - "^gpio5" -> pin 5 with the internal pull-up enabled
pub fn parse_pin_string(s: &str) -> Option<PinSpec> {
    let s = s.trim();

    let (s, pull_up) = match s.strip_prefix('^') {
        Some(rest) => (rest, true),
        None => (s, false),
    };

    let pin: u8 = s.strip_prefix("gpio")?.parse().ok()?;
    if pin >= GPIO_COUNT {
        return None;
    }

    Some(PinSpec { pin, pull_up })
}

/// One open-drain bus line
pub struct BusLine<'d> {
    pin: Flex<'d>,
}

impl<'d> BusLine<'d> {
    /// Create a released line
    pub fn new(pin: Peri<'d, AnyPin>, pull_up: bool) -> Self {
        let mut pin = Flex::new(pin);
        pin.set_pull(if pull_up { Pull::Up } else { Pull::None });
        pin.set_low();
        pin.set_as_input();
        Self { pin }
    }
}

impl FlexPin for BusLine<'_> {
    fn set_output(&mut self, level: Level) {
        match level {
            Level::Low => self.pin.set_low(),
            Level::High => self.pin.set_high(),
        }
        self.pin.set_as_output();
    }

    fn set_input(&mut self) {
        self.pin.set_as_input();
    }

    fn read(&self) -> Level {
        Level::from(self.pin.is_high())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pin_string() {
        assert_eq!(
            parse_pin_string("gpio4"),
            Some(PinSpec {
                pin: 4,
                pull_up: false
            })
        );
        assert_eq!(
            parse_pin_string(" ^gpio29 "),
            Some(PinSpec {
                pin: 29,
                pull_up: true
            })
        );
    }

    #[test]
    fn test_parse_invalid_pin_string() {
        assert_eq!(parse_pin_string("gpio30"), None);
        assert_eq!(parse_pin_string("pin4"), None);
        assert_eq!(parse_pin_string("gpio"), None);
        assert_eq!(parse_pin_string("!gpio4"), None);
    }
}

//! TM1650 register protocol
//!
//! Every register access is one bus transaction:
//!
//! ```text
//! START | command | data | STOP
//! ```
//!
//! Writes send the data byte; the key read clocks it in from the chip.
//! A byte the chip does not acknowledge abandons the transaction, but the
//! STOP is still issued so the bus is left idle.

use tm1650_core::config::{SegmentMode, MAX_DIGITS, MAX_INTENSITY, MAX_KEYCODE};

use crate::bus::{BusError, ByteBus};

/// Command bytes
pub mod cmd {
    /// Write the control register
    pub const CONTROL: u8 = 0x48;
    /// Read the key register
    pub const READ_KEYS: u8 = 0x49;
    /// First digit register
    pub const DIGIT_BASE: u8 = 0x68;
    /// Address step between digit registers
    pub const DIGIT_STRIDE: u8 = 2;

    /// Register address for a digit position
    pub const fn digit_address(pos: usize) -> Option<u8> {
        if pos < super::MAX_DIGITS {
            Some(DIGIT_BASE + DIGIT_STRIDE * pos as u8)
        } else {
            None
        }
    }

    /// Digit position addressed by a command byte
    pub fn digit_position(command: u8) -> Option<usize> {
        let offset = command.checked_sub(DIGIT_BASE)?;
        if offset % DIGIT_STRIDE != 0 {
            return None;
        }
        let pos = (offset / DIGIT_STRIDE) as usize;
        (pos < super::MAX_DIGITS).then_some(pos)
    }
}

/// Control register bits
pub mod ctrl {
    /// Display enable
    pub const DISPLAY_ON: u8 = 0x01;
    /// Seven-segment drive (decimal point line unused)
    pub const SEVEN_SEGMENT: u8 = 0x08;
    /// Brightness field position
    pub const BRIGHTNESS_SHIFT: u8 = 4;
    /// Brightness field mask (after shifting)
    pub const BRIGHTNESS_MASK: u8 = 0x07;
}

/// Key register bits
pub mod key {
    /// A key is held
    pub const PRESSED: u8 = 0x40;
    /// Always set in a valid key byte
    pub const MARKER: u8 = 0x04;
    /// Key input (KI line) field position
    pub const INPUT_SHIFT: u8 = 3;
    /// Key input field mask (after shifting)
    pub const INPUT_MASK: u8 = 0x07;
    /// Grid (DIG line) mask
    pub const GRID_MASK: u8 = 0x03;
    /// Grids scanned per key input
    pub const GRIDS_PER_INPUT: u8 = 4;
}

/// Control register contents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlWord {
    /// Brightness (0-7)
    pub intensity: u8,
    /// Display enabled
    pub power: bool,
    /// Segment drive mode
    pub mode: SegmentMode,
}

impl ControlWord {
    /// Encode for the control register
    ///
    /// Intensity 0 blanks the display by clearing the enable bit, even
    /// with power on.
    pub fn encode(&self) -> u8 {
        let intensity = self.intensity.min(MAX_INTENSITY);
        let mut word = (intensity & ctrl::BRIGHTNESS_MASK) << ctrl::BRIGHTNESS_SHIFT;
        if self.mode == SegmentMode::SevenSegment {
            word |= ctrl::SEVEN_SEGMENT;
        }
        if self.power && intensity != 0 {
            word |= ctrl::DISPLAY_ON;
        }
        word
    }
}

/// Decode a key register byte into a one-hot key bitmask
///
/// Returns 0 when no key is held, when the marker bit is missing, or when
/// the key index does not fit the 16-bit mask.
pub fn decode_keys(byte: u8) -> u16 {
    if byte & key::PRESSED == 0 || byte & key::MARKER == 0 {
        return 0;
    }
    let input = (byte >> key::INPUT_SHIFT) & key::INPUT_MASK;
    let grid = byte & key::GRID_MASK;
    let index = input * key::GRIDS_PER_INPUT + grid;
    if index > MAX_KEYCODE {
        return 0;
    }
    1 << index
}

/// Register-level access to one chip
pub struct Registers<B> {
    bus: B,
}

impl<B: ByteBus> Registers<B> {
    /// Wrap a bus
    pub fn new(bus: B) -> Self {
        Self { bus }
    }

    /// Release the bus
    pub fn free(self) -> B {
        self.bus
    }

    /// Mutable access to the bus
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Write one digit register
    ///
    /// Positions past the last register are ignored.
    pub fn write_digit(&mut self, pos: usize, segments: u8) -> Result<(), BusError> {
        match cmd::digit_address(pos) {
            Some(address) => self.write(address, segments),
            None => Ok(()),
        }
    }

    /// Write the control register
    pub fn write_control(&mut self, word: ControlWord) -> Result<(), BusError> {
        self.write(cmd::CONTROL, word.encode())
    }

    /// Read the key register as a bitmask of held keys
    pub fn read_keys(&mut self) -> Result<u16, BusError> {
        self.bus.start();
        if !self.bus.write_byte(cmd::READ_KEYS) {
            self.bus.stop();
            return Err(BusError::Nack {
                byte: cmd::READ_KEYS,
            });
        }
        let byte = self.bus.read_byte();
        self.bus.stop();
        Ok(decode_keys(byte))
    }

    fn write(&mut self, command: u8, data: u8) -> Result<(), BusError> {
        self.bus.start();
        let result = self.send(command).and_then(|()| self.send(data));
        self.bus.stop();
        result
    }

    fn send(&mut self, byte: u8) -> Result<(), BusError> {
        if self.bus.write_byte(byte) {
            Ok(())
        } else {
            Err(BusError::Nack { byte })
        }
    }
}

//! Key change detection
//!
//! One [`KeyState`] per configured key. Each scan produces a bitmask of
//! pressed keys; a key reports only when its bit differs from the state
//! it last reported. There is no software debounce: one read is one
//! decision.

use crate::config::{validate_keycode, ConfigError};

/// Edge detector for a single key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyState {
    /// Bit position in the key bitmask
    code: u8,
    /// Last reported state
    pressed: bool,
}

impl KeyState {
    /// Create a released key
    ///
    /// Fails if `code` is outside 0-15.
    pub fn new(code: u8) -> Result<Self, ConfigError> {
        validate_keycode(code)?;
        Ok(Self {
            code,
            pressed: false,
        })
    }

    /// Keycode
    pub fn code(&self) -> u8 {
        self.code
    }

    /// Last reported state
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Feed a scan result
    ///
    /// Returns the new state if it changed.
    pub fn update(&mut self, mask: u16) -> Option<bool> {
        let pressed = mask & (1 << self.code) != 0;
        if pressed == self.pressed {
            return None;
        }
        self.pressed = pressed;
        Some(pressed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_code() {
        assert_eq!(KeyState::new(16), Err(ConfigError::KeycodeOutOfRange(16)));
        assert!(KeyState::new(15).is_ok());
    }

    #[test]
    fn test_press_release_sequence() {
        let mut key = KeyState::new(0).unwrap();
        let changes: [Option<bool>; 4] = [0b0000, 0b0001, 0b0001, 0b0000].map(|m| key.update(m));
        assert_eq!(changes, [None, Some(true), None, Some(false)]);
    }

    #[test]
    fn test_other_bits_ignored() {
        let mut key = KeyState::new(3).unwrap();
        assert_eq!(key.update(0b0111), None);
        assert_eq!(key.update(0b1000), Some(true));
        assert!(key.is_pressed());
        assert_eq!(key.update(0xFFFF), None);
        assert_eq!(key.update(0x0000), Some(false));
    }

    #[test]
    fn test_high_keycode() {
        let mut key = KeyState::new(15).unwrap();
        assert_eq!(key.update(0x8000), Some(true));
        assert_eq!(key.code(), 15);
    }
}

//! Configuration type definitions
//!
//! Display and key settings plus the limits they are validated against.

use heapless::String;

use super::segment_map::SegmentMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum label length
pub const MAX_LABEL_LEN: usize = 16;

/// Maximum digits the framebuffer can hold
pub const MAX_DIGITS: usize = 6;

/// Maximum key observers per panel
pub const MAX_KEYS: usize = 16;

/// Highest valid intensity level
pub const MAX_INTENSITY: u8 = 7;

/// Highest valid keycode (bit position in the key bitmask)
pub const MAX_KEYCODE: u8 = 15;

/// Default display update interval
pub const DEFAULT_UPDATE_INTERVAL_MS: u32 = 1000;

/// Default key scan interval
pub const DEFAULT_KEY_SCAN_INTERVAL_MS: u32 = 50;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Digit count outside 1-6
    LengthOutOfRange(u8),
    /// Intensity outside 0-7
    IntensityOutOfRange(u8),
    /// Keycode outside 0-15
    KeycodeOutOfRange(u8),
    /// Segment map contains an unknown letter or too many letters
    InvalidSegmentMap,
    /// Update or scan interval of zero
    ZeroInterval,
    /// Clock and data assigned to the same pin
    PinConflict(u8),
    /// More keys than the scanner can hold
    TooManyKeys,
    /// Settle delay of zero or above the limit
    BitDelayOutOfRange(u32),
}

/// Segment drive mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SegmentMode {
    /// Eight segments per digit (decimal point driven)
    #[default]
    EightSegment,
    /// Seven segments per digit
    SevenSegment,
}

/// Display settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// Number of digits fitted (1-6)
    pub length: u8,
    /// Brightness (0-7, 0 blanks the display)
    pub intensity: u8,
    /// Display enabled
    pub power: bool,
    /// Segment drive mode
    pub mode: SegmentMode,
    /// Board segment wiring
    pub segment_map: SegmentMap,
    /// Poll period for pushing content
    pub update_interval_ms: u32,
    /// Digits wired right to left (position 0 on the last register)
    pub reversed: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            length: MAX_DIGITS as u8,
            intensity: MAX_INTENSITY,
            power: true,
            mode: SegmentMode::EightSegment,
            segment_map: SegmentMap::IDENTITY,
            update_interval_ms: DEFAULT_UPDATE_INTERVAL_MS,
            reversed: false,
        }
    }
}

impl DisplayConfig {
    /// Check every field against its allowed range
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_length(self.length)?;
        validate_intensity(self.intensity)?;
        if self.update_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        Ok(())
    }
}

/// A key exposed as a binary sensor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KeyConfig {
    /// Key name (e.g., "up", "enter")
    pub name: String<MAX_LABEL_LEN>,
    /// Bit position in the key bitmask (0-15)
    pub key: u8,
}

impl KeyConfig {
    /// Create a key config, truncating the name to the label limit
    pub fn new(name: &str, key: u8) -> Self {
        let mut label = String::new();
        for ch in name.chars() {
            if label.push(ch).is_err() {
                break;
            }
        }
        Self { name: label, key }
    }

    /// Check the keycode range
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_keycode(self.key)
    }
}

/// Check a digit count
pub fn validate_length(length: u8) -> Result<(), ConfigError> {
    if length == 0 || length as usize > MAX_DIGITS {
        return Err(ConfigError::LengthOutOfRange(length));
    }
    Ok(())
}

/// Check an intensity level
pub fn validate_intensity(intensity: u8) -> Result<(), ConfigError> {
    if intensity > MAX_INTENSITY {
        return Err(ConfigError::IntensityOutOfRange(intensity));
    }
    Ok(())
}

/// Check a keycode
pub fn validate_keycode(key: u8) -> Result<(), ConfigError> {
    if key > MAX_KEYCODE {
        return Err(ConfigError::KeycodeOutOfRange(key));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_display_config_is_valid() {
        let config = DisplayConfig::default();
        assert_eq!(config.length, 6);
        assert_eq!(config.intensity, 7);
        assert!(config.power);
        assert_eq!(config.update_interval_ms, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_length_bounds() {
        assert_eq!(validate_length(0), Err(ConfigError::LengthOutOfRange(0)));
        assert!(validate_length(1).is_ok());
        assert!(validate_length(6).is_ok());
        assert_eq!(validate_length(7), Err(ConfigError::LengthOutOfRange(7)));
    }

    #[test]
    fn test_intensity_bounds() {
        assert!(validate_intensity(0).is_ok());
        assert!(validate_intensity(7).is_ok());
        assert_eq!(
            validate_intensity(8),
            Err(ConfigError::IntensityOutOfRange(8))
        );
    }

    #[test]
    fn test_invalid_display_config() {
        let config = DisplayConfig {
            intensity: 8,
            ..DisplayConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::IntensityOutOfRange(8)));

        let config = DisplayConfig {
            update_interval_ms: 0,
            ..DisplayConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroInterval));
    }

    #[test]
    fn test_key_config() {
        let key = KeyConfig::new("enter", 15);
        assert_eq!(key.name.as_str(), "enter");
        assert!(key.validate().is_ok());

        let key = KeyConfig::new("bad", 16);
        assert_eq!(key.validate(), Err(ConfigError::KeycodeOutOfRange(16)));

        // Long names are truncated rather than rejected
        let key = KeyConfig::new("a-very-long-key-name", 0);
        assert_eq!(key.name.len(), MAX_LABEL_LEN);
    }
}

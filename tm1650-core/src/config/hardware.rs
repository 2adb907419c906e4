//! Hardware configuration types
//!
//! Pin assignments and bus timing, plus the top-level panel configuration
//! tying display and key settings together.

use heapless::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::types::{
    ConfigError, DisplayConfig, KeyConfig, DEFAULT_KEY_SCAN_INTERVAL_MS, MAX_KEYS,
};

/// Default settle delay after each line transition
pub const DEFAULT_BIT_DELAY_US: u32 = 10;

/// Longest settle delay accepted
pub const MAX_BIT_DELAY_US: u32 = 1000;

/// Two-wire bus configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BusConfig {
    /// Clock line GPIO number
    pub clk_pin: u8,
    /// Data line GPIO number
    pub dio_pin: u8,
    /// Settle delay after each line transition (microseconds)
    pub bit_delay_us: u32,
    /// Enable the internal pull-up on the clock line
    pub clk_pull_up: bool,
    /// Enable the internal pull-up on the data line
    pub dio_pull_up: bool,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            clk_pin: 4,
            dio_pin: 5,
            bit_delay_us: DEFAULT_BIT_DELAY_US,
            clk_pull_up: false,
            dio_pull_up: false,
        }
    }
}

impl BusConfig {
    /// Check that clock and data are distinct pins and the delay is sane
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.clk_pin == self.dio_pin {
            return Err(ConfigError::PinConflict(self.clk_pin));
        }
        if self.bit_delay_us == 0 || self.bit_delay_us > MAX_BIT_DELAY_US {
            return Err(ConfigError::BitDelayOutOfRange(self.bit_delay_us));
        }
        Ok(())
    }
}

/// Complete panel configuration
///
/// This is the top-level configuration structure that contains the bus,
/// display and key configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PanelConfig {
    /// Bus pins and timing
    pub bus: BusConfig,
    /// Display settings
    pub display: DisplayConfig,
    /// Keys exposed as binary sensors
    pub keys: Vec<KeyConfig, MAX_KEYS>,
    /// Poll period for the key register
    pub key_scan_interval_ms: u32,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            bus: BusConfig::default(),
            display: DisplayConfig::default(),
            keys: Vec::new(),
            key_scan_interval_ms: DEFAULT_KEY_SCAN_INTERVAL_MS,
        }
    }
}

impl PanelConfig {
    /// Create a configuration with defaults and no keys
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate every section
    ///
    /// Returns the first problem found; a panel must not be built from a
    /// configuration that fails here.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bus.validate()?;
        self.display.validate()?;
        for key in &self.keys {
            key.validate()?;
        }
        if self.key_scan_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        Ok(())
    }

    /// Add a key, rejecting it if the table is full
    pub fn add_key(&mut self, key: KeyConfig) -> Result<(), ConfigError> {
        self.keys.push(key).map_err(|_| ConfigError::TooManyKeys)
    }

    /// Find a key by name
    pub fn find_key(&self, name: &str) -> Option<&KeyConfig> {
        self.keys.iter().find(|k| k.name.as_str() == name)
    }

    /// Check if any key is configured
    pub fn has_keys(&self) -> bool {
        !self.keys.is_empty()
    }
}

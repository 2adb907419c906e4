//! Configuration loading and parsing
//!
//! The panel configuration is embedded at compile time and parsed at
//! boot by a custom no_std parser.

pub mod toml;

use defmt::*;
use tm1650_core::config::{PanelConfig, SegmentMode};

pub use self::toml::{parse_config, ParseError};

/// Embedded configuration (compiled into firmware)
/// Edit panel.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../../panel.toml");

/// Parse the embedded configuration
///
/// Falls back to defaults if it does not parse. build.rs validates the
/// file, so this only happens if the two disagree.
pub fn load_config() -> PanelConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration successfully");
            config
        }
        Err(e) => {
            error!("Failed to parse embedded config: {}", e);
            error!("Using default configuration");
            PanelConfig::default()
        }
    }
}

/// Log the effective configuration
pub fn log_config(config: &PanelConfig) {
    info!(
        "Bus: clk={}gpio{} dio={}gpio{} delay={}us",
        if config.bus.clk_pull_up { "^" } else { "" },
        config.bus.clk_pin,
        if config.bus.dio_pull_up { "^" } else { "" },
        config.bus.dio_pin,
        config.bus.bit_delay_us
    );
    info!(
        "Display: {} digits, intensity {}, power {}, {}, every {}ms",
        config.display.length,
        config.display.intensity,
        config.display.power,
        match config.display.mode {
            SegmentMode::EightSegment => "8-segment",
            SegmentMode::SevenSegment => "7-segment",
        },
        config.display.update_interval_ms
    );
    if config.display.reversed {
        debug!("  digits reversed");
    }
    if !config.display.segment_map.is_identity() {
        debug!("  custom segment map");
    }
    info!(
        "Keys: {} configured, scan every {}ms",
        config.keys.len(),
        config.key_scan_interval_ms
    );
    for key in &config.keys {
        debug!("  key {} -> {}", key.key, key.name.as_str());
    }
}

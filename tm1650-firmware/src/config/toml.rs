//! Simple TOML parser for panel configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! the panel configuration. It does NOT support the full TOML spec.
//!
//! Supported features:
//! - Key = value pairs (string, integer, boolean)
//! - [section] and [section.name] headers
//! - Comments (# ...)
//!
//! NOT supported:
//! - Arrays and inline tables
//! - Multi-line strings
//! - Dotted keys outside section headers

use heapless::String as HString;

use tm1650_core::config::{
    ConfigError, KeyConfig, PanelConfig, SegmentMap, SegmentMode, MAX_LABEL_LEN,
};
use tm1650_hal_rp2040::parse_pin_string;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Invalid section header
    InvalidSection,
    /// Key not valid in its section
    UnknownKey,
    /// Invalid value type
    InvalidValue,
    /// Too many items (exceeded heapless capacity)
    TooManyItems,
    /// Invalid pin string
    InvalidPin,
    /// Key section without a code
    MissingKeyCode,
    /// Values parsed but out of range
    Invalid(ConfigError),
}

impl From<ConfigError> for ParseError {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::TooManyKeys => ParseError::TooManyItems,
            other => ParseError::Invalid(other),
        }
    }
}

/// Current parsing context
#[derive(Debug, Clone)]
enum Section {
    Root,
    Bus,
    Display,
    Keys,
    Key(HString<MAX_LABEL_LEN>),
}

/// Parse TOML configuration into a validated PanelConfig
///
/// Sections and keys that are absent keep their defaults.
pub fn parse_config(input: &str) -> Result<PanelConfig, ParseError> {
    let mut config = PanelConfig::new();
    let mut section = Section::Root;
    let mut current_code: Option<u8> = None;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            save_key(&section, current_code.take(), &mut config)?;
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidValue)?;
        apply_value(&section, key, value, &mut config, &mut current_code)?;
    }

    save_key(&section, current_code, &mut config)?;

    config.validate()?;
    Ok(config)
}

/// Add the key section just finished to the config
fn save_key(
    section: &Section,
    code: Option<u8>,
    config: &mut PanelConfig,
) -> Result<(), ParseError> {
    if let Section::Key(name) = section {
        let code = code.ok_or(ParseError::MissingKeyCode)?;
        config.add_key(KeyConfig {
            name: name.clone(),
            key: code,
        })?;
    }
    Ok(())
}

/// Parse section header like "bus" or "key.enter"
fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    let header = header.trim();

    if let Some((section_type, name)) = header.split_once('.') {
        if section_type != "key" || name.is_empty() || name.contains('.') {
            return Err(ParseError::InvalidSection);
        }
        let name = HString::try_from(name).map_err(|_| ParseError::InvalidSection)?;
        return Ok(Section::Key(name));
    }

    match header {
        "bus" => Ok(Section::Bus),
        "display" => Ok(Section::Display),
        "keys" => Ok(Section::Keys),
        _ => Err(ParseError::InvalidSection),
    }
}

fn apply_value(
    section: &Section,
    key: &str,
    value: &str,
    config: &mut PanelConfig,
    current_code: &mut Option<u8>,
) -> Result<(), ParseError> {
    match section {
        Section::Bus => match key {
            "clk_pin" | "dio_pin" => {
                let spec = parse_pin_string(parse_string(value)?).ok_or(ParseError::InvalidPin)?;
                if key == "clk_pin" {
                    config.bus.clk_pin = spec.pin;
                    config.bus.clk_pull_up = spec.pull_up;
                } else {
                    config.bus.dio_pin = spec.pin;
                    config.bus.dio_pull_up = spec.pull_up;
                }
            }
            "bit_delay_us" => config.bus.bit_delay_us = parse_int(value)?,
            _ => return Err(ParseError::UnknownKey),
        },
        Section::Display => match key {
            "length" => config.display.length = parse_int(value)?,
            "intensity" => config.display.intensity = parse_int(value)?,
            "power" => config.display.power = parse_bool(value)?,
            "mode" => config.display.mode = parse_mode(value)?,
            "segment_map" => config.display.segment_map = SegmentMap::parse(parse_string(value)?)?,
            "update_interval_ms" => config.display.update_interval_ms = parse_int(value)?,
            "reversed" => config.display.reversed = parse_bool(value)?,
            _ => return Err(ParseError::UnknownKey),
        },
        Section::Keys => match key {
            "scan_interval_ms" => config.key_scan_interval_ms = parse_int(value)?,
            _ => return Err(ParseError::UnknownKey),
        },
        Section::Key(_) => match key {
            "code" => *current_code = Some(parse_int(value)?),
            _ => return Err(ParseError::UnknownKey),
        },
        Section::Root => return Err(ParseError::UnknownKey),
    }
    Ok(())
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = value.trim();

    // Remove inline comments
    let value = match value.find('#') {
        // Make sure # is not inside a string
        Some(hash_pos) if value[..hash_pos].matches('"').count() % 2 == 0 => {
            value[..hash_pos].trim()
        }
        _ => value,
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> Result<&str, ParseError> {
    match value.strip_prefix('"') {
        Some(rest) => rest.strip_suffix('"').ok_or(ParseError::InvalidValue),
        // Allow unquoted strings for simple values
        None => Ok(value),
    }
}

/// Parse an integer value
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Parse segment mode
fn parse_mode(value: &str) -> Result<SegmentMode, ParseError> {
    match parse_string(value)? {
        "8segment" | "8" => Ok(SegmentMode::EightSegment),
        "7segment" | "7" => Ok(SegmentMode::SevenSegment),
        _ => Err(ParseError::InvalidValue),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_section_header() {
        match parse_section_header("key.enter").unwrap() {
            Section::Key(name) => assert_eq!(name.as_str(), "enter"),
            _ => panic!("Wrong section type"),
        }
        assert!(matches!(parse_section_header(" bus "), Ok(Section::Bus)));
        assert!(parse_section_header("led.red").is_err());
        assert!(parse_section_header("key.").is_err());
        assert!(parse_section_header("key.a.b").is_err());
    }

    #[test]
    fn test_parse_key_value() {
        assert_eq!(parse_key_value("length = 4 # digits"), Some(("length", "4")));
        assert_eq!(
            parse_key_value("segment_map = \"PG#FEDCBA\""),
            Some(("segment_map", "\"PG#FEDCBA\""))
        );
        assert_eq!(parse_key_value("length ="), None);
    }

    #[test]
    fn test_parse_full_config() {
        let config_str = r#"
[bus]
clk_pin = "gpio10"
dio_pin = "^gpio11"
bit_delay_us = 5

[display]
length = 4
intensity = 3
power = false
mode = "7segment"
segment_map = "PGFEDCBA"
update_interval_ms = 500
reversed = true

[keys]
scan_interval_ms = 20

[key.up]
code = 0

[key.enter]
code = 15
"#;

        let config = parse_config(config_str).unwrap();
        assert_eq!(config.bus.clk_pin, 10);
        assert_eq!(config.bus.dio_pin, 11);
        assert!(!config.bus.clk_pull_up);
        assert!(config.bus.dio_pull_up);
        assert_eq!(config.bus.bit_delay_us, 5);
        assert_eq!(config.display.length, 4);
        assert_eq!(config.display.intensity, 3);
        assert!(!config.display.power);
        assert_eq!(config.display.mode, SegmentMode::SevenSegment);
        assert!(config.display.segment_map.is_identity());
        assert_eq!(config.display.update_interval_ms, 500);
        assert!(config.display.reversed);
        assert_eq!(config.key_scan_interval_ms, 20);
        assert_eq!(config.keys.len(), 2);
        assert_eq!(config.find_key("enter").map(|k| k.key), Some(15));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("# nothing here\n").unwrap();
        assert_eq!(config, PanelConfig::default());
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        assert_eq!(
            parse_config("[display]\nlength = 7\n"),
            Err(ParseError::Invalid(ConfigError::LengthOutOfRange(7)))
        );
        assert_eq!(
            parse_config("[display]\nintensity = 8\n"),
            Err(ParseError::Invalid(ConfigError::IntensityOutOfRange(8)))
        );
        assert_eq!(
            parse_config("[key.bad]\ncode = 16\n"),
            Err(ParseError::Invalid(ConfigError::KeycodeOutOfRange(16)))
        );
        assert_eq!(
            parse_config("[bus]\nclk_pin = \"gpio5\"\n"),
            Err(ParseError::Invalid(ConfigError::PinConflict(5)))
        );
        assert_eq!(
            parse_config("[bus]\nbit_delay_us = 0\n"),
            Err(ParseError::Invalid(ConfigError::BitDelayOutOfRange(0)))
        );
    }

    #[test]
    fn test_pull_up_is_per_line() {
        let config = parse_config("[bus]\nclk_pin = \"^gpio2\"\ndio_pin = \"gpio3\"\n").unwrap();
        assert!(config.bus.clk_pull_up);
        assert!(!config.bus.dio_pull_up);
    }

    #[test]
    fn test_short_mode_spellings() {
        let config = parse_config("[display]\nmode = \"7\"\n").unwrap();
        assert_eq!(config.display.mode, SegmentMode::SevenSegment);
    }

    #[test]
    fn test_malformed_input_rejected() {
        assert_eq!(parse_config("[key.up]\n"), Err(ParseError::MissingKeyCode));
        assert_eq!(
            parse_config("[bus]\nclk_pin = \"pin4\"\n"),
            Err(ParseError::InvalidPin)
        );
        assert_eq!(
            parse_config("[display]\nbrightness = 3\n"),
            Err(ParseError::UnknownKey)
        );
        assert_eq!(
            parse_config("[display]\npower = yes\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(parse_config("[motor]\n"), Err(ParseError::InvalidSection));
    }
}

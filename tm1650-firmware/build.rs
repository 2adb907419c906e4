//! Build script for tm1650-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates panel.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Segment map letters
const SEGMENT_LETTERS: &str = "ABCDEFGP";

/// Keys each section accepts
const BUS_KEYS: &[&str] = &["clk_pin", "dio_pin", "bit_delay_us"];
const DISPLAY_KEYS: &[&str] = &[
    "length",
    "intensity",
    "power",
    "mode",
    "segment_map",
    "update_interval_ms",
    "reversed",
];
const KEYS_KEYS: &[&str] = &["scan_interval_ms"];
const KEY_KEYS: &[&str] = &["code"];

/// Segment mode spellings
const MODES: &[&str] = &["8segment", "8", "7segment", "7"];

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate panel.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=panel.toml");

    let config_path = Path::new("panel.toml");

    if !config_path.exists() {
        fail(
            "ERROR: panel.toml not found!",
            &[
                "The firmware requires a panel.toml configuration file.".to_string(),
                "Please create one in the tm1650-firmware directory.".to_string(),
            ],
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("ERROR: Failed to read panel.toml", &[e.to_string()]),
    };

    // Parse and validate TOML syntax
    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => fail(
            "ERROR: Invalid TOML syntax in panel.toml",
            &e.to_string().lines().map(str::to_string).collect::<Vec<_>>(),
        ),
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_bus(&config, &mut errors);
    validate_display(&config, &mut errors);
    validate_keys(&config, &mut errors);

    if !errors.is_empty() {
        fail("ERROR: Invalid panel configuration", &errors);
    }

    println!("cargo:warning=panel.toml validated successfully");
}

/// Abort the build with a boxed error message
fn fail(title: &str, lines: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  {:<64} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        format_error_lines(lines)
    )
}

/// Format error message lines with box drawing
fn format_error_lines(lines: &[String]) -> String {
    lines
        .iter()
        .map(|line| {
            let truncated = if line.chars().count() > 62 {
                format!("{}...", line.chars().take(59).collect::<String>())
            } else {
                line.clone()
            };
            format!("║  • {:<62} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Only known sections are allowed
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(table) = config.as_table() else {
        return;
    };
    for (name, value) in table {
        if !["bus", "display", "keys", "key"].contains(&name.as_str()) {
            errors.push(format!("Unknown section [{}]", name));
        } else if !value.is_table() {
            errors.push(format!("'{}' must be a [{}] section", name, name));
        }
    }
}

/// Only known keys are allowed in a section
fn check_keys(table: &toml::Table, section: &str, allowed: &[&str], errors: &mut Vec<String>) {
    for key in table.keys() {
        if !allowed.contains(&key.as_str()) {
            errors.push(format!("[{}] unknown key '{}'", section, key));
        }
    }
}

/// Check a boolean field
fn check_bool(table: &toml::Table, section: &str, key: &str, errors: &mut Vec<String>) {
    if let Some(value) = table.get(key) {
        if !value.is_bool() {
            errors.push(format!("[{}] {} must be true or false", section, key));
        }
    }
}

/// Check an integer field against a range
fn check_range(
    table: &toml::Table,
    section: &str,
    key: &str,
    min: i64,
    max: i64,
    errors: &mut Vec<String>,
) {
    match table.get(key) {
        Some(toml::Value::Integer(v)) if (min..=max).contains(v) => {}
        Some(toml::Value::Integer(_)) => {
            errors.push(format!("[{}] {} must be {}-{}", section, key, min, max));
        }
        Some(_) => errors.push(format!("[{}] {} must be an integer", section, key)),
        None => {}
    }
}

/// Parse "gpioN" or "^gpioN"
fn pin_number(value: &toml::Value) -> Option<i64> {
    let s = value.as_str()?.trim();
    let s = s.strip_prefix('^').unwrap_or(s);
    let pin: i64 = s.strip_prefix("gpio")?.parse().ok()?;
    (0..30).contains(&pin).then_some(pin)
}

/// Validate the [bus] section
fn validate_bus(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(bus) = config.get("bus").and_then(|b| b.as_table()) else {
        return;
    };
    check_keys(bus, "bus", BUS_KEYS, errors);

    let mut pins = Vec::new();
    for key in ["clk_pin", "dio_pin"] {
        if let Some(value) = bus.get(key) {
            match pin_number(value) {
                Some(pin) => pins.push(pin),
                None => errors.push(format!("[bus] {} must be \"gpio0\"-\"gpio29\"", key)),
            }
        }
    }
    if pins.len() == 2 && pins[0] == pins[1] {
        errors.push("[bus] clk_pin and dio_pin must differ".to_string());
    }

    // Same limits as BusConfig::validate
    check_range(bus, "bus", "bit_delay_us", 1, 1000, errors);
}

/// Validate the [display] section
fn validate_display(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(display) = config.get("display").and_then(|d| d.as_table()) else {
        return;
    };
    check_keys(display, "display", DISPLAY_KEYS, errors);

    check_range(display, "display", "length", 1, 6, errors);
    check_range(display, "display", "intensity", 0, 7, errors);
    check_range(display, "display", "update_interval_ms", 1, u32::MAX as i64, errors);
    check_bool(display, "display", "power", errors);
    check_bool(display, "display", "reversed", errors);

    if let Some(mode) = display.get("mode") {
        if !mode.as_str().is_some_and(|mode| MODES.contains(&mode)) {
            errors.push("[display] mode must be '8segment' or '7segment'".to_string());
        }
    }

    if let Some(map) = display.get("segment_map") {
        let valid = map.as_str().is_some_and(|map| {
            let upper = map.to_ascii_uppercase();
            (1..=8).contains(&upper.len())
                && upper.chars().all(|c| SEGMENT_LETTERS.contains(c))
                && upper
                    .chars()
                    .enumerate()
                    .all(|(i, c)| !upper[..i].contains(c))
        });
        if !valid {
            errors.push(
                "[display] segment_map must be 1-8 distinct letters A-G, P".to_string(),
            );
        }
    }
}

/// Validate the [keys] and [key.*] sections
fn validate_keys(config: &toml::Value, errors: &mut Vec<String>) {
    if let Some(keys) = config.get("keys").and_then(|k| k.as_table()) {
        check_keys(keys, "keys", KEYS_KEYS, errors);
        check_range(keys, "keys", "scan_interval_ms", 1, u32::MAX as i64, errors);
    }

    let Some(keys) = config.get("key") else {
        return;
    };
    let Some(keys) = keys.as_table() else {
        errors.push("[key.*] sections must be tables".to_string());
        return;
    };

    if keys.len() > 16 {
        errors.push(format!("At most 16 keys allowed, found {}", keys.len()));
    }

    for (name, key) in keys {
        let section = format!("key.{}", name);
        if name.len() > 16 {
            errors.push(format!("[{}] name longer than 16 characters", section));
        }
        match key.as_table() {
            Some(key) if key.contains_key("code") => {
                check_keys(key, &section, KEY_KEYS, errors);
                check_range(key, &section, "code", 0, 15, errors);
            }
            Some(_) => errors.push(format!("[{}] missing 'code'", section)),
            None => errors.push(format!("[{}] must be a table", section)),
        }
    }
}

//! Build script for gyre-firmware
//!
//! - Sets up linker search paths and scripts for memory.x
//! - Validates device.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Sections the firmware parser understands
const SECTIONS: &[&str] = &["pins", "motion", "button", "console", "modes"];

/// Pins the firmware drives
const PIN_KEYS: &[&str] = &["coil_a1", "coil_a2", "coil_b1", "coil_b2", "button"];

/// GPIO 16/17 carry the console UART
const RESERVED_PINS: &[u8] = &[16, 17];

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths and scripts for memory.x
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
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate device.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=device.toml");

    let config_path = Path::new("device.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: device.toml not found!                                   ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds device.toml as its configuration.           ║\n\
            ║  Please create one in the gyre-firmware directory.               ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read device.toml                               ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in device.toml                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_pins(&config, &mut errors);
    validate_motion(&config, &mut errors);
    validate_button(&config, &mut errors);
    validate_console(&config, &mut errors);
    validate_modes(&config, &mut errors);
    validate_scaled_delays(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid configuration in device.toml                     ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=device.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Reject sections the firmware parser would refuse
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        return;
    };
    for (name, value) in root {
        if !SECTIONS.contains(&name.as_str()) {
            errors.push(format!("unknown section [{}]", name));
        } else if !value.is_table() {
            errors.push(format!("[{}] must be a table", name));
        }
    }
}

/// Parse "gpioN" with optional "!" and "^" prefixes
fn parse_pin(s: &str) -> Option<u8> {
    let s = s.trim_start_matches(['!', '^']);
    s.strip_prefix("gpio")?.parse().ok()
}

fn validate_pins(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(pins) = config.get("pins").and_then(|p| p.as_table()) else {
        return;
    };

    let mut seen: Vec<(u8, &str)> = Vec::new();
    for &key in PIN_KEYS {
        let Some(value) = pins.get(key) else {
            continue;
        };
        let Some(pin) = value.as_str().and_then(parse_pin) else {
            errors.push(format!("[pins] {} must look like \"gpioN\"", key));
            continue;
        };
        if pin > 29 {
            errors.push(format!("[pins] {} = gpio{} is out of range", key, pin));
        } else if RESERVED_PINS.contains(&pin) {
            errors.push(format!("[pins] {} = gpio{} is the console UART", key, pin));
        } else if let Some((_, other)) = seen.iter().find(|(p, _)| *p == pin) {
            errors.push(format!("[pins] {} and {} share gpio{}", other, key, pin));
        } else {
            seen.push((pin, key));
        }
    }
}

/// Look up `section.key` as an integer within `range`; absent keys pass
fn int_in(
    table: &toml::Table,
    section: &str,
    key: &str,
    range: std::ops::RangeInclusive<i64>,
    errors: &mut Vec<String>,
) -> Option<i64> {
    let value = table.get(key)?;
    match value.as_integer() {
        Some(v) if range.contains(&v) => Some(v),
        Some(_) => {
            errors.push(format!(
                "[{}] {} must be {}-{}",
                section,
                key,
                range.start(),
                range.end()
            ));
            None
        }
        None => {
            errors.push(format!("[{}] {} must be an integer", section, key));
            None
        }
    }
}

fn require_bool(table: &toml::Table, section: &str, key: &str, errors: &mut Vec<String>) {
    if let Some(value) = table.get(key) {
        if !value.is_bool() {
            errors.push(format!("[{}] {} must be true or false", section, key));
        }
    }
}

fn table<'a>(config: &'a toml::Value, path: &[&str]) -> Option<&'a toml::Table> {
    path.iter()
        .try_fold(config, |value, name| value.get(*name))?
        .as_table()
}

const U32_RANGE: std::ops::RangeInclusive<i64> = 0..=u32::MAX as i64;

fn validate_motion(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(motion) = table(config, &["motion"]) else {
        return;
    };

    int_in(motion, "motion", "steps_per_rotation", 1..=u32::MAX as i64, errors);
    for key in ["step_hold_us", "step_gap_us", "settle_pause_ms"] {
        int_in(motion, "motion", key, U32_RANGE, errors);
    }
}

fn validate_button(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(button) = table(config, &["button"]) else {
        return;
    };

    for key in ["debounce_ms", "idle_poll_ms"] {
        int_in(button, "button", key, U32_RANGE, errors);
    }
    for key in ["start_running", "active_low"] {
        require_bool(button, "button", key, errors);
    }
}

fn validate_console(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(console) = table(config, &["console"]) else {
        return;
    };

    int_in(console, "console", "baudrate", 1..=u32::MAX as i64, errors);
    int_in(console, "console", "boot_delay_ms", U32_RANGE, errors);
}

fn validate_modes(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(modes) = table(config, &["modes"]) else {
        return;
    };

    for key in ["normal_multiplier", "fast_multiplier"] {
        int_in(modes, "modes", key, 1..=255, errors);
    }

    if let Some(selector) = modes.get("selector") {
        if !matches!(selector.as_str(), Some("cycle" | "light")) {
            errors.push("[modes] selector must be 'cycle' or 'light'".to_string());
        }
    }

    if let Some(light) = modes.get("light") {
        match light.as_table() {
            Some(light) => {
                int_in(light, "modes.light", "level", 0..=u16::MAX as i64, errors);
                int_in(
                    light,
                    "modes.light",
                    "rate",
                    i16::MIN as i64..=i16::MAX as i64,
                    errors,
                );
                for key in ["bright_above", "steady_rate"] {
                    int_in(light, "modes.light", key, 0..=u16::MAX as i64, errors);
                }
            }
            None => errors.push("[modes.light] must be a table".to_string()),
        }
    }
}

/// Delays are divided by the speed multiplier; neither may truncate to zero
fn validate_scaled_delays(config: &toml::Value, errors: &mut Vec<String>) {
    let setting = |path: &[&str], key: &str, default: i64| {
        table(config, path)
            .and_then(|t| t.get(key))
            .and_then(|v| v.as_integer())
            .unwrap_or(default)
    };

    for (delay_key, default_us) in [("step_hold_us", 5_000), ("step_gap_us", 5_000)] {
        let delay_us = setting(&["motion"], delay_key, default_us);
        for (mult_key, default_mult) in [("normal_multiplier", 1), ("fast_multiplier", 2)] {
            let multiplier = setting(&["modes"], mult_key, default_mult);
            if multiplier > 0 && delay_us >= 0 && delay_us / multiplier == 0 {
                errors.push(format!(
                    "[motion] {} = {} truncates to 0 at {} = {}",
                    delay_key, delay_us, mult_key, multiplier
                ));
            }
        }
    }
}

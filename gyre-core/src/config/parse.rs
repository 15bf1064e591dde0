//! Minimal TOML parser for device configuration
//!
//! Handles only the subset the device file uses. It does NOT support the
//! full TOML syntax.
//!
//! Supported:
//! - `[section]` headers
//! - `key = value` pairs (string, integer, boolean)
//! - Comments (`# ...`), including trailing ones
//!
//! Keys this parser does not know are skipped so the file can carry notes
//! for other tools. Unknown sections are an error.

use super::types::{DeviceConfig, PinConfig, SelectorKind};
use crate::motion::SpeedMultiplier;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Invalid section header
    InvalidSection,
    /// Invalid value type
    InvalidValue,
    /// Invalid pin string
    InvalidPin,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Pins,
    Motion,
    Button,
    Console,
    Modes,
    Light,
}

/// Parse TOML configuration into a [`DeviceConfig`]
///
/// Anything not present keeps its default.
pub fn parse_config(input: &str) -> Result<DeviceConfig, ParseError> {
    let mut config = DeviceConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();

        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        if let Some((key, value)) = parse_key_value(line) {
            apply_value(section, key, value, &mut config)?;
        }
    }

    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "pins" => Ok(Section::Pins),
        "motion" => Ok(Section::Motion),
        "button" => Ok(Section::Button),
        "console" => Ok(Section::Console),
        "modes" => Ok(Section::Modes),
        "modes.light" => Ok(Section::Light),
        _ => Err(ParseError::InvalidSection),
    }
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut DeviceConfig,
) -> Result<(), ParseError> {
    match section {
        Section::Root => {}
        Section::Pins => {
            let pins = &mut config.pins;
            match key {
                "coil_a1" => pins.coil_a1 = parse_pin(value)?,
                "coil_a2" => pins.coil_a2 = parse_pin(value)?,
                "coil_b1" => pins.coil_b1 = parse_pin(value)?,
                "coil_b2" => pins.coil_b2 = parse_pin(value)?,
                "button" => pins.button = parse_pin(value)?,
                _ => {}
            }
        }
        Section::Motion => {
            let motion = &mut config.motion;
            match key {
                "steps_per_rotation" => motion.steps_per_rotation = parse_int(value)?,
                "step_hold_us" => motion.step_hold_us = parse_int(value)?,
                "step_gap_us" => motion.step_gap_us = parse_int(value)?,
                "settle_pause_ms" => motion.settle_pause_ms = parse_int(value)?,
                _ => {}
            }
        }
        Section::Button => {
            let button = &mut config.button;
            match key {
                "debounce_ms" => button.debounce_ms = parse_int(value)?,
                "idle_poll_ms" => button.idle_poll_ms = parse_int(value)?,
                "start_running" => button.start_running = parse_bool(value)?,
                "active_low" => button.active_low = parse_bool(value)?,
                _ => {}
            }
        }
        Section::Console => {
            let console = &mut config.console;
            match key {
                "baudrate" => console.baudrate = parse_int(value)?,
                "boot_delay_ms" => console.boot_delay_ms = parse_int(value)?,
                _ => {}
            }
        }
        Section::Modes => {
            let modes = &mut config.modes;
            match key {
                "normal_multiplier" => modes.speeds.normal = parse_multiplier(value)?,
                "fast_multiplier" => modes.speeds.fast = parse_multiplier(value)?,
                "selector" => modes.selector = parse_selector(value)?,
                _ => {}
            }
        }
        Section::Light => {
            let light = &mut config.modes.light;
            match key {
                "level" => light.level = parse_int(value)?,
                "rate" => light.rate = parse_int(value)?,
                "bright_above" => light.thresholds.bright_above = parse_int(value)?,
                "steady_rate" => light.thresholds.steady_rate = parse_int(value)?,
                _ => {}
            }
        }
    }
    Ok(())
}

/// Cut a `#` comment off the line unless the `#` sits inside a string
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (pos, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..pos],
            _ => {}
        }
    }
    line
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = value.trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

/// Decimal integer, with `_` allowed between digits as in `115_200`
fn parse_int<T: TryFrom<i64>>(value: &str) -> Result<T, ParseError> {
    let (negative, digits) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value.strip_prefix('+').unwrap_or(value)),
    };

    let mut n: i64 = 0;
    for group in digits.split('_') {
        if group.is_empty() || !group.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::InvalidValue);
        }
        for b in group.bytes() {
            n = n
                .checked_mul(10)
                .and_then(|n| n.checked_add(i64::from(b - b'0')))
                .ok_or(ParseError::InvalidValue)?;
        }
    }

    let n = if negative { -n } else { n };
    T::try_from(n).map_err(|_| ParseError::InvalidValue)
}

fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

fn parse_multiplier(value: &str) -> Result<SpeedMultiplier, ParseError> {
    SpeedMultiplier::new(parse_int(value)?).ok_or(ParseError::InvalidValue)
}

fn parse_selector(value: &str) -> Result<SelectorKind, ParseError> {
    match parse_string(value) {
        "cycle" => Ok(SelectorKind::Cycle),
        "light" => Ok(SelectorKind::Light),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Parse a pin string like "gpio0", "!gpio1", "^gpio8"
pub fn parse_pin(value: &str) -> Result<PinConfig, ParseError> {
    let mut s = parse_string(value);
    let mut inverted = false;
    let mut pull_up = false;

    loop {
        if let Some(rest) = s.strip_prefix('!') {
            inverted = true;
            s = rest;
        } else if let Some(rest) = s.strip_prefix('^') {
            pull_up = true;
            s = rest;
        } else {
            break;
        }
    }

    let number = s.strip_prefix("gpio").ok_or(ParseError::InvalidPin)?;
    let pin: u8 = number.parse().map_err(|_| ParseError::InvalidPin)?;

    Ok(PinConfig {
        pin,
        inverted,
        pull_up,
    })
}

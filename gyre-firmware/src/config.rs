//! Device configuration loading
//!
//! The configuration is compiled in from device.toml. If it fails to
//! parse or validate, the built-in defaults are used instead.

use defmt::*;

use gyre_core::config::{parse_config, ConfigError, DeviceConfig, ParseError};
use gyre_hal_rp2040::pins::check_pin;
use gyre_hal_rp2040::PinError;

/// Embedded configuration (compiled into firmware)
/// Edit device.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../device.toml");

/// Why the embedded configuration was rejected
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoadError {
    Parse(ParseError),
    Invalid(ConfigError),
    Pin(PinError),
}

impl From<ParseError> for LoadError {
    fn from(e: ParseError) -> Self {
        LoadError::Parse(e)
    }
}

impl From<ConfigError> for LoadError {
    fn from(e: ConfigError) -> Self {
        LoadError::Invalid(e)
    }
}

impl From<PinError> for LoadError {
    fn from(e: PinError) -> Self {
        LoadError::Pin(e)
    }
}

/// Load the embedded configuration, falling back to defaults
pub fn load() -> DeviceConfig {
    match try_load(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration successfully");
            config
        }
        Err(e) => {
            // build.rs rejects most of these before they get here
            error!("Failed to load embedded config: {:?}", e);
            error!("Using built-in defaults");
            DeviceConfig::default()
        }
    }
}

fn try_load(source: &str) -> Result<DeviceConfig, LoadError> {
    let config = parse_config(source)?;
    config.validate()?;
    for pin in config.pins.all() {
        check_pin(pin.pin)?;
    }
    Ok(config)
}

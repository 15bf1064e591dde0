//! Configuration types
//!
//! Board-agnostic device configuration, the TOML-subset parser that
//! fills it, and the validation run before the controller is built.

pub mod parse;
pub mod types;

pub use parse::{parse_config, parse_pin, ParseError};
pub use types::*;

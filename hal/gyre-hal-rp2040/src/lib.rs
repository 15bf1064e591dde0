//! RP2040-specific HAL for the stepper turntable firmware
//!
//! This crate provides RP2040 implementations of the shared `gyre-hal`
//! traits, plus RP2040-specific functionality:
//!
//! - GPIO wrappers for the coil outputs and the button input
//! - Dynamic pin allocation for config-driven setup
//! - Blocking UART transmitter for the status console

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod pins;
pub mod uart;

pub use gpio::{RpInput, RpOutput};
pub use pins::{ConsolePins, PinBank, PinError, RemainingPeripherals};
pub use uart::ConsoleTx;

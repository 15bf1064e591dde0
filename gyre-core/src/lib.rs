//! Board-agnostic core logic for the stepper turntable firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware-facing traits (coil driver, status sink, mode selector)
//! - The fixed full-step excitation table
//! - Step emission and full-rotation driving
//! - Debounced push-button toggle
//! - Motor state machine and mode cycling
//! - Status line formatting
//! - Configuration types, parsing and validation

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod controller;
pub mod excitation;
pub mod input;
pub mod motion;
pub mod selector;
pub mod state;
pub mod status;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;

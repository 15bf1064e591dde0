//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in gyre-core, built on the pin and UART traits from gyre-hal:
//!
//! - Four-wire coil output (direct GPIO or ULN2003-style driver board)
//! - Line-oriented serial console for status reports

#![no_std]
#![deny(unsafe_code)]

pub mod coil;
pub mod console;

pub use coil::{idle_level, FourWireCoils};
pub use console::SerialConsole;

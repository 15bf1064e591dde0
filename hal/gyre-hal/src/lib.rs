//! Gyre Hardware Abstraction Layer
//!
//! This crate defines the hardware traits the turntable logic is written
//! against. Chip-specific crates implement them; host tests implement
//! them with simulated pins.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  gyre-firmware / gyre-core / drivers    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  gyre-hal (this crate - traits)         │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ gyre-hal-     │       │  simulated    │
//! │    rp2040     │       │  (host tests) │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O (coils, button)
//! - [`uart::UartTx`] - Serial status console

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use gpio::{InputPin, Level, OutputPin};
pub use uart::{UartConfig, UartTx};

//! Four-wire coil output
//!
//! Drives the four coil inputs of a unipolar stepper (typically through a
//! ULN2003 darlington board) from four GPIO pins. Each output can be
//! inverted for boards that sink current on a HIGH input.

use gyre_core::excitation::{CoilPattern, COIL_COUNT};
use gyre_core::traits::CoilDriver;
use gyre_hal::{Level, OutputPin};

/// Coil outputs in excitation order (A1, A2, B1, B2)
pub struct FourWireCoils<P> {
    pins: [P; COIL_COUNT],
    /// Per-pin inversion: energized = pin LOW
    inverted: [bool; COIL_COUNT],
    current: Option<CoilPattern>,
}

impl<P: OutputPin> FourWireCoils<P> {
    /// Create a driver with active-high outputs
    ///
    /// Pins are left as they are until the first pattern is applied.
    pub fn new(pins: [P; COIL_COUNT]) -> Self {
        Self::with_inversion(pins, [false; COIL_COUNT])
    }

    /// Create a driver with per-pin inversion
    pub fn with_inversion(pins: [P; COIL_COUNT], inverted: [bool; COIL_COUNT]) -> Self {
        Self {
            pins,
            inverted,
            current: None,
        }
    }
}

/// Level a coil output should start at so the coil stays off
///
/// Pins must be created at this level; the driver itself leaves them
/// alone until the first pattern.
pub fn idle_level(inverted: bool) -> Level {
    output_level(false, inverted)
}

fn output_level(on: bool, inverted: bool) -> Level {
    Level::from(on != inverted)
}

impl<P: OutputPin> CoilDriver for FourWireCoils<P> {
    fn energize(&mut self, pattern: CoilPattern) {
        let levels = pattern.levels();
        for ((pin, &on), &inverted) in self.pins.iter_mut().zip(&levels).zip(&self.inverted) {
            pin.set_level(output_level(on, inverted));
        }
        self.current = Some(pattern);
    }

    fn current(&self) -> Option<CoilPattern> {
        self.current
    }
}

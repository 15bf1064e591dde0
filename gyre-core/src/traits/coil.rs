//! Coil driver trait
//!
//! Abstracts over the way the four coil inputs are driven (direct GPIO,
//! ULN2003 darlington array, shift register, ...).

use crate::excitation::CoilPattern;

/// Four-coil stepper output stage
pub trait CoilDriver {
    /// Apply a coil pattern to the four outputs
    ///
    /// All four outputs are written on every call, even if unchanged.
    fn energize(&mut self, pattern: CoilPattern);

    /// The last pattern applied, or `None` before the first write
    fn current(&self) -> Option<CoilPattern>;
}

impl<T: CoilDriver + ?Sized> CoilDriver for &mut T {
    fn energize(&mut self, pattern: CoilPattern) {
        T::energize(self, pattern)
    }

    fn current(&self) -> Option<CoilPattern> {
        T::current(self)
    }
}

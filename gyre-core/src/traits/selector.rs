//! Mode selection strategy traits

use crate::state::Mode;

/// Chooses the mode for the next rotation
///
/// Invoked once between rotations, after the previous one has completed.
pub trait ModeSelector {
    /// Select the mode that follows `completed`
    fn select_next(&mut self, completed: Mode) -> Mode;
}

impl<T: ModeSelector + ?Sized> ModeSelector for &mut T {
    fn select_next(&mut self, completed: Mode) -> Mode {
        T::select_next(self, completed)
    }
}

/// Ambient light sample used by light-driven selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LightReading {
    /// Smoothed light intensity (sensor units)
    pub smoothed: u16,
    /// Rate of change of the intensity (sensor units per sample)
    pub rate: i16,
}

/// Source of light readings
pub trait LightSource {
    /// Latest reading
    fn reading(&mut self) -> LightReading;
}

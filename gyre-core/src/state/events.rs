//! Events that trigger state transitions

use super::mode::Mode;

/// Events that can change the motor state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Falling edge on the button (debounced)
    ButtonPressed,
    /// A full rotation finished; `next` is the mode chosen for the next one
    RotationComplete { next: Mode },
}

//! Motor state definition
//!
//! Motor behavior is a function of the current state and an event.

use super::events::Event;
use super::mode::Mode;

/// Run flag and current mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotorState {
    /// Rotations proceed only while set
    pub running: bool,
    /// Mode used for the next rotation
    pub mode: Mode,
}

impl Default for MotorState {
    fn default() -> Self {
        Self::new(true)
    }
}

impl MotorState {
    /// Initial state: mode 1, running as configured
    pub fn new(running: bool) -> Self {
        Self {
            running,
            mode: Mode::NormalCw,
        }
    }

    /// Process an event and return the next state
    pub fn transition(self, event: Event) -> Self {
        match event {
            Event::ButtonPressed => Self {
                running: !self.running,
                ..self
            },
            Event::RotationComplete { next } if self.running => Self { mode: next, ..self },
            // A rotation can't complete while stopped
            Event::RotationComplete { .. } => self,
        }
    }
}

//! Status lines
//!
//! Fixed-format, human-readable lines reported on the serial console.
//! Not a protocol: nothing parses these.

use core::fmt;

use crate::motion::SpeedMultiplier;
use crate::state::Mode;
use crate::traits::Direction;

/// Longest formatted line, without line terminator
pub const MAX_LINE_LEN: usize = 48;

/// A single status report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StatusLine {
    /// Console is up
    Booted,
    /// Coils and button configured
    Ready,
    /// Button toggled the run flag
    ButtonPressed { running: bool },
    /// Mode about to be driven
    MotorState(Mode),
    /// Mode banner
    ModeBanner(Mode),
    /// Rotation starting
    RotationStart {
        direction: Direction,
        multiplier: SpeedMultiplier,
    },
    /// Settle pause after a rotation
    Pause { ms: u32 },
    /// Idle poll while stopped
    Stopped,
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusLine::Booted => f.write_str("Gyre initialized - stepper motor + button"),
            StatusLine::Ready => f.write_str("Stepper motor and button ready"),
            StatusLine::ButtonPressed { running } => write!(
                f,
                "Button pressed - motor {}",
                if *running { "Running" } else { "Stopped" }
            ),
            StatusLine::MotorState(mode) => write!(f, "Motor state: {}", mode.number()),
            StatusLine::ModeBanner(mode) => {
                write!(f, "Mode {}: {}", mode.number(), mode.label())
            }
            StatusLine::RotationStart {
                direction,
                multiplier,
            } => write!(
                f,
                "{} | Speed multiplier: {}",
                direction.label(),
                multiplier.get()
            ),
            StatusLine::Pause { ms } if ms % 1_000 == 0 => write!(f, "Pause {}s", ms / 1_000),
            StatusLine::Pause { ms } => write!(f, "Pause {}ms", ms),
            StatusLine::Stopped => f.write_str("Motor stopped..."),
        }
    }
}

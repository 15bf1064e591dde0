//! Operating modes
//!
//! Four fixed speed/direction combinations, cycled in order.

use crate::motion::SpeedMultiplier;
use crate::traits::Direction;

/// Number of modes in the cycle
pub const MODE_COUNT: u8 = 4;

/// Speed and direction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Mode 1: normal speed, clockwise
    #[default]
    NormalCw = 1,
    /// Mode 2: normal speed, counter-clockwise
    NormalCcw = 2,
    /// Mode 3: fast, clockwise
    FastCw = 3,
    /// Mode 4: fast, counter-clockwise
    FastCcw = 4,
}

impl Mode {
    /// All modes in cycle order
    pub const ALL: [Mode; MODE_COUNT as usize] =
        [Mode::NormalCw, Mode::NormalCcw, Mode::FastCw, Mode::FastCcw];

    /// Mode number (1-4)
    pub fn number(self) -> u8 {
        self as u8
    }

    /// Mode from its number (1-4)
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Mode::NormalCw),
            2 => Some(Mode::NormalCcw),
            3 => Some(Mode::FastCw),
            4 => Some(Mode::FastCcw),
            _ => None,
        }
    }

    /// Next mode in the cycle (4 wraps to 1)
    pub fn next(self) -> Self {
        match self {
            Mode::NormalCw => Mode::NormalCcw,
            Mode::NormalCcw => Mode::FastCw,
            Mode::FastCw => Mode::FastCcw,
            Mode::FastCcw => Mode::NormalCw,
        }
    }

    /// Rotation direction for this mode
    pub fn direction(self) -> Direction {
        match self {
            Mode::NormalCw | Mode::FastCw => Direction::Clockwise,
            Mode::NormalCcw | Mode::FastCcw => Direction::CounterClockwise,
        }
    }

    /// Check if this is one of the fast modes
    pub fn is_fast(self) -> bool {
        matches!(self, Mode::FastCw | Mode::FastCcw)
    }

    /// Console label
    pub fn label(self) -> &'static str {
        match self {
            Mode::NormalCw => "Normal CW",
            Mode::NormalCcw => "Normal CCW",
            Mode::FastCw => "Fast CW",
            Mode::FastCcw => "Fast CCW",
        }
    }
}

/// Speed multipliers for the normal and fast modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModeSpeeds {
    pub normal: SpeedMultiplier,
    pub fast: SpeedMultiplier,
}

impl Default for ModeSpeeds {
    fn default() -> Self {
        Self {
            normal: SpeedMultiplier::NORMAL,
            fast: SpeedMultiplier::FAST,
        }
    }
}

impl ModeSpeeds {
    /// Multiplier used by `mode`
    pub fn multiplier(&self, mode: Mode) -> SpeedMultiplier {
        if mode.is_fast() {
            self.fast
        } else {
            self.normal
        }
    }
}

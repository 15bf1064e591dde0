//! Light-driven mode selection
//!
//! Maps brightness and its rate of change onto the four modes:
//!
//! | | steady | changing |
//! |---|---|---|
//! | bright | Mode 1 (normal CW) | Mode 3 (fast CW) |
//! | dim | Mode 2 (normal CCW) | Mode 4 (fast CCW) |

use crate::state::Mode;
use crate::traits::{LightReading, LightSource, ModeSelector};

/// Default brightness threshold (strictly above is bright)
pub const DEFAULT_BRIGHT_ABOVE: u16 = 1000;

/// Default rate limit (at or below, in magnitude, is steady)
pub const DEFAULT_STEADY_RATE: u16 = 50;

/// Classification thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LightThresholds {
    pub bright_above: u16,
    pub steady_rate: u16,
}

impl Default for LightThresholds {
    fn default() -> Self {
        Self {
            bright_above: DEFAULT_BRIGHT_ABOVE,
            steady_rate: DEFAULT_STEADY_RATE,
        }
    }
}

impl LightThresholds {
    /// Mode for a reading
    pub fn classify(&self, reading: LightReading) -> Mode {
        let bright = reading.smoothed > self.bright_above;
        let steady = reading.rate.unsigned_abs() <= self.steady_rate;

        match (bright, steady) {
            (true, true) => Mode::NormalCw,
            (false, true) => Mode::NormalCcw,
            (true, false) => Mode::FastCw,
            (false, false) => Mode::FastCcw,
        }
    }
}

/// Source that always returns the same reading
///
/// Stands in for a real sensor, which this board does not have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedLight(LightReading);

impl FixedLight {
    pub fn new(smoothed: u16, rate: i16) -> Self {
        Self(LightReading { smoothed, rate })
    }
}

impl LightSource for FixedLight {
    fn reading(&mut self) -> LightReading {
        self.0
    }
}

/// Selects the next mode from a light source, ignoring the completed mode
#[derive(Debug, Clone)]
pub struct LightLevelSelector<S> {
    source: S,
    thresholds: LightThresholds,
}

impl<S: LightSource> LightLevelSelector<S> {
    pub fn new(source: S, thresholds: LightThresholds) -> Self {
        Self { source, thresholds }
    }
}

impl<S: LightSource> ModeSelector for LightLevelSelector<S> {
    fn select_next(&mut self, _completed: Mode) -> Mode {
        self.thresholds.classify(self.source.reading())
    }
}

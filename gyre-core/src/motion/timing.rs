//! Step timing and speed scaling
//!
//! Base delays are configured in microseconds and divided by the speed
//! multiplier. Any sub-microsecond remainder is dropped; a result of zero
//! is rejected rather than silently producing an unbounded step rate.

use core::num::NonZeroU8;

/// Default phase hold time at multiplier 1 (microseconds)
pub const DEFAULT_STEP_HOLD_US: u32 = 5_000;

/// Default gap between step emissions at multiplier 1 (microseconds)
pub const DEFAULT_STEP_GAP_US: u32 = 5_000;

/// Speed multiplier applied to the base step delays
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpeedMultiplier(NonZeroU8);

impl SpeedMultiplier {
    /// Normal speed (x1)
    pub const NORMAL: SpeedMultiplier = SpeedMultiplier(NonZeroU8::MIN);

    /// Fast speed (x2)
    pub const FAST: SpeedMultiplier = match NonZeroU8::new(2) {
        Some(m) => SpeedMultiplier(m),
        None => panic!("2 is non-zero"),
    };

    /// Create a multiplier, `None` for zero
    pub const fn new(multiplier: u8) -> Option<Self> {
        match NonZeroU8::new(multiplier) {
            Some(m) => Some(Self(m)),
            None => None,
        }
    }

    /// Raw multiplier value
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl Default for SpeedMultiplier {
    fn default() -> Self {
        Self::NORMAL
    }
}

/// Timing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimingError {
    /// Scaled hold or gap delay would be zero microseconds
    TruncatesToZero,
}

/// Per-step delays for one speed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepTiming {
    /// Time a phase pattern is held after being applied (microseconds)
    pub hold_us: u32,
    /// Additional gap before the next step emission (microseconds)
    pub gap_us: u32,
}

impl Default for StepTiming {
    fn default() -> Self {
        Self {
            hold_us: DEFAULT_STEP_HOLD_US,
            gap_us: DEFAULT_STEP_GAP_US,
        }
    }
}

impl StepTiming {
    /// Scale base delays by a speed multiplier
    ///
    /// # Errors
    /// [`TimingError::TruncatesToZero`] if either delay divides down to 0 µs.
    pub fn scaled(
        base_hold_us: u32,
        base_gap_us: u32,
        multiplier: SpeedMultiplier,
    ) -> Result<Self, TimingError> {
        let m = multiplier.get() as u32;
        let hold_us = base_hold_us / m;
        let gap_us = base_gap_us / m;

        if hold_us == 0 || gap_us == 0 {
            return Err(TimingError::TruncatesToZero);
        }

        Ok(Self { hold_us, gap_us })
    }

    /// Total time spent per step emission (microseconds)
    pub fn step_period_us(&self) -> u32 {
        self.hold_us.saturating_add(self.gap_us)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_constants() {
        assert_eq!(SpeedMultiplier::NORMAL.get(), 1);
        assert_eq!(SpeedMultiplier::FAST.get(), 2);
        assert!(SpeedMultiplier::new(0).is_none());
        assert_eq!(SpeedMultiplier::default(), SpeedMultiplier::NORMAL);
    }

    #[test]
    fn test_normal_timing() {
        let t = StepTiming::scaled(5_000, 5_000, SpeedMultiplier::NORMAL).unwrap();
        assert_eq!(t, StepTiming::default());
        assert_eq!(t.step_period_us(), 10_000);
    }

    #[test]
    fn test_fast_timing_keeps_half_milliseconds() {
        // 5 ms / 2 is 2.5 ms, not the 2 ms a millisecond-resolution division gives
        let t = StepTiming::scaled(5_000, 5_000, SpeedMultiplier::FAST).unwrap();
        assert_eq!(t.hold_us, 2_500);
        assert_eq!(t.gap_us, 2_500);
    }

    #[test]
    fn test_truncation_to_zero_rejected() {
        let m = SpeedMultiplier::new(200).unwrap();
        assert_eq!(
            StepTiming::scaled(150, 5_000, m),
            Err(TimingError::TruncatesToZero)
        );
        assert_eq!(
            StepTiming::scaled(5_000, 0, SpeedMultiplier::NORMAL),
            Err(TimingError::TruncatesToZero)
        );
    }

    proptest! {
        #[test]
        fn prop_scaled_never_zero_and_never_slower(
            hold in 0u32..1_000_000,
            gap in 0u32..1_000_000,
            m in 1u8..=255,
        ) {
            let mult = SpeedMultiplier::new(m).unwrap();
            match StepTiming::scaled(hold, gap, mult) {
                Ok(t) => {
                    prop_assert!(t.hold_us > 0 && t.gap_us > 0);
                    prop_assert!(t.hold_us <= hold && t.gap_us <= gap);
                }
                Err(TimingError::TruncatesToZero) => {
                    prop_assert!(hold < m as u32 || gap < m as u32);
                }
            }
        }
    }
}

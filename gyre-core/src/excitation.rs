//! Full-step excitation table
//!
//! The motor is driven in wave mode: exactly one coil input is energized
//! per phase. Coil order everywhere in this crate is A1, A2, B1, B2.

use crate::traits::Direction;

/// Number of coil inputs on the motor
pub const COIL_COUNT: usize = 4;

/// Number of phases in one electrical cycle
pub const PHASE_COUNT: usize = 4;

/// Levels for the four coil inputs (true = energized)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CoilPattern([bool; COIL_COUNT]);

impl CoilPattern {
    /// All coils off
    pub const OFF: CoilPattern = CoilPattern([false; COIL_COUNT]);

    /// Create a pattern from explicit levels (A1, A2, B1, B2)
    pub const fn new(levels: [bool; COIL_COUNT]) -> Self {
        Self(levels)
    }

    /// Levels in coil order
    pub const fn levels(&self) -> [bool; COIL_COUNT] {
        self.0
    }

    /// Level of a single coil, `false` for out-of-range indices
    pub fn coil(&self, index: usize) -> bool {
        self.0.get(index).copied().unwrap_or(false)
    }

    /// Number of energized coils
    pub fn energized_count(&self) -> usize {
        self.0.iter().filter(|&&on| on).count()
    }
}

/// One row per phase; immutable for the program's lifetime
pub const EXCITATION_TABLE: [CoilPattern; PHASE_COUNT] = [
    CoilPattern::new([true, false, false, false]),
    CoilPattern::new([false, true, false, false]),
    CoilPattern::new([false, false, true, false]),
    CoilPattern::new([false, false, false, true]),
];

/// Index into the excitation table (0..=3)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Phase(u8);

impl Phase {
    /// Create a phase, `None` if `index` is outside the table
    pub const fn new(index: u8) -> Option<Self> {
        if (index as usize) < PHASE_COUNT {
            Some(Self(index))
        } else {
            None
        }
    }

    /// Table index
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Phase used for the `step`-th emission of a rotation
    ///
    /// Clockwise walks 0, 1, 2, 3, 0, ...; counter-clockwise walks
    /// 3, 2, 1, 0, 3, ...
    pub const fn for_step(step: u32, direction: Direction) -> Self {
        let forward = (step % PHASE_COUNT as u32) as u8;
        match direction {
            Direction::Clockwise => Self(forward),
            Direction::CounterClockwise => Self(PHASE_COUNT as u8 - 1 - forward),
        }
    }

    /// Coil pattern for this phase
    pub const fn pattern(self) -> CoilPattern {
        EXCITATION_TABLE[self.0 as usize]
    }
}

//! Stepper rotation direction

/// Motor rotation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Clockwise rotation (phases walked 0, 1, 2, 3)
    Clockwise,
    /// Counter-clockwise rotation (phases walked 3, 2, 1, 0)
    CounterClockwise,
}

impl Direction {
    /// Get the opposite direction
    pub fn opposite(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }

    /// Console label
    pub fn label(self) -> &'static str {
        match self {
            Direction::Clockwise => "Clockwise",
            Direction::CounterClockwise => "Counterclockwise",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite() {
        assert_eq!(Direction::Clockwise.opposite(), Direction::CounterClockwise);
        assert_eq!(Direction::CounterClockwise.opposite(), Direction::Clockwise);
    }
}

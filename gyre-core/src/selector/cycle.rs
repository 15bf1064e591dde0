//! Fixed mode cycle

use crate::state::Mode;
use crate::traits::ModeSelector;

/// Advances to the next mode after every rotation, ignoring all input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleSelector;

impl ModeSelector for CycleSelector {
    fn select_next(&mut self, completed: Mode) -> Mode {
        completed.next()
    }
}

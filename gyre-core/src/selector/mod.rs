//! Mode selection strategies
//!
//! - [`CycleSelector`]: fixed 1 → 2 → 3 → 4 → 1 cycle (default)
//! - [`LightLevelSelector`]: picks the mode from an ambient light reading

pub mod cycle;
pub mod light;

pub use cycle::CycleSelector;
pub use light::{FixedLight, LightLevelSelector, LightThresholds};

use crate::config::{ModesConfig, SelectorKind};
use crate::state::Mode;
use crate::traits::ModeSelector;

/// Selector chosen by configuration
#[derive(Debug, Clone)]
pub enum AnySelector {
    Cycle(CycleSelector),
    Light(LightLevelSelector<FixedLight>),
}

impl AnySelector {
    /// Build the selector named in the config
    pub fn from_config(config: &ModesConfig) -> Self {
        match config.selector {
            SelectorKind::Cycle => AnySelector::Cycle(CycleSelector),
            SelectorKind::Light => AnySelector::Light(LightLevelSelector::new(
                FixedLight::new(config.light.level, config.light.rate),
                config.light.thresholds,
            )),
        }
    }
}

impl ModeSelector for AnySelector {
    fn select_next(&mut self, completed: Mode) -> Mode {
        match self {
            AnySelector::Cycle(s) => s.select_next(completed),
            AnySelector::Light(s) => s.select_next(completed),
        }
    }
}

//! GPIO wrappers
//!
//! Thin adapters from embassy-rp pins to the `gyre-hal` pin traits.

use embassy_rp::gpio::{AnyPin, Input, Level, Output, Pull};
use embassy_rp::Peri;

/// Push-pull output
pub struct RpOutput {
    pin: Output<'static>,
}

impl RpOutput {
    /// Claim the pin as an output already driven to `initial`
    pub fn new(pin: Peri<'static, AnyPin>, initial: gyre_hal::Level) -> Self {
        let level = match initial {
            gyre_hal::Level::High => Level::High,
            gyre_hal::Level::Low => Level::Low,
        };
        Self {
            pin: Output::new(pin, level),
        }
    }
}

impl gyre_hal::OutputPin for RpOutput {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }
}

/// Digital input with optional internal pull-up
pub struct RpInput {
    pin: Input<'static>,
}

impl RpInput {
    pub fn new(pin: Peri<'static, AnyPin>, pull_up: bool) -> Self {
        let pull = if pull_up { Pull::Up } else { Pull::None };
        Self {
            pin: Input::new(pin, pull),
        }
    }
}

impl gyre_hal::InputPin for RpInput {
    fn is_high(&self) -> bool {
        self.pin.is_high()
    }
}

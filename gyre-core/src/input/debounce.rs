//! Debounced push-button toggle
//!
//! The button is sampled once per controller loop. A released-to-pressed
//! transition counts as a press; after a press the caller waits a fixed
//! settle time before sampling again, so contact bounce inside that
//! window is never seen.

use embedded_hal_async::delay::DelayNs;
use gyre_hal::InputPin;

/// Settle time after a detected press (milliseconds)
pub const DEFAULT_DEBOUNCE_MS: u32 = 300;

/// Result of one button sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEdge {
    /// No change since the last sample
    None,
    /// Released -> pressed
    Pressed,
    /// Pressed -> released
    Released,
}

/// Edge detector for a single push-button
#[derive(Debug, Clone)]
pub struct ToggleButton {
    /// Pressed level is LOW (pull-up wiring)
    active_low: bool,
    /// Settle time after a press
    debounce_ms: u32,
    /// Logical state seen at the last sample
    last_pressed: bool,
}

impl Default for ToggleButton {
    fn default() -> Self {
        Self::new(true, DEFAULT_DEBOUNCE_MS)
    }
}

impl ToggleButton {
    /// Create a toggle button
    ///
    /// The button is assumed released at start-up.
    pub fn new(active_low: bool, debounce_ms: u32) -> Self {
        Self {
            active_low,
            debounce_ms,
            last_pressed: false,
        }
    }

    /// Sample the pin and report the edge since the previous sample
    pub fn sample<P: InputPin>(&mut self, pin: &P) -> ButtonEdge {
        let pressed = pin.is_high() != self.active_low;
        let edge = match (self.last_pressed, pressed) {
            (false, true) => ButtonEdge::Pressed,
            (true, false) => ButtonEdge::Released,
            _ => ButtonEdge::None,
        };
        self.last_pressed = pressed;
        edge
    }

    /// Wait out contact bounce after a press
    pub async fn settle<D: DelayNs>(&self, delay: &mut D) {
        delay.delay_ms(self.debounce_ms).await;
    }

    /// Logical state at the last sample
    pub fn is_pressed(&self) -> bool {
        self.last_pressed
    }

    /// Configured settle time
    pub fn debounce_ms(&self) -> u32 {
        self.debounce_ms
    }
}

//! Configuration type definitions
//!
//! Defaults reproduce the reference board: coils on GPIO 0/1/3/2, an
//! active-low button with pull-up on GPIO 8, 512 steps per rotation and a
//! 115200 baud console.

use crate::motion::rotation::{DEFAULT_SETTLE_PAUSE_MS, DEFAULT_STEPS_PER_ROTATION};
use crate::motion::timing::{DEFAULT_STEP_GAP_US, DEFAULT_STEP_HOLD_US};
use crate::motion::{SpeedMultiplier, StepTiming, TimingError};
use crate::input::DEFAULT_DEBOUNCE_MS;
use crate::selector::LightThresholds;
use crate::state::ModeSpeeds;

/// Number of GPIO pins on the RP2040
pub const GPIO_COUNT: u8 = 30;

/// Default idle poll interval while stopped (milliseconds)
pub const DEFAULT_IDLE_POLL_MS: u32 = 100;

/// Default console baud rate
pub const DEFAULT_BAUDRATE: u32 = 115_200;

/// Default wait before the first console line (milliseconds)
pub const DEFAULT_BOOT_DELAY_MS: u32 = 1_000;

/// Pin configuration with optional inversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinConfig {
    /// GPIO pin number (0-29 for RP2040)
    pub pin: u8,
    /// Pin is active-low (inverted)
    pub inverted: bool,
    /// Enable internal pull-up
    pub pull_up: bool,
}

impl PinConfig {
    /// Create a new pin config
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
            pull_up: false,
        }
    }

    /// Create an inverted (active-low) pin
    pub const fn inverted(pin: u8) -> Self {
        Self {
            pin,
            inverted: true,
            pull_up: false,
        }
    }

    /// Create a pin with pull-up enabled
    pub const fn with_pullup(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
            pull_up: true,
        }
    }
}

/// Pin assignments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinsConfig {
    pub coil_a1: PinConfig,
    pub coil_a2: PinConfig,
    pub coil_b1: PinConfig,
    pub coil_b2: PinConfig,
    pub button: PinConfig,
}

impl Default for PinsConfig {
    fn default() -> Self {
        Self {
            coil_a1: PinConfig::new(0),
            coil_a2: PinConfig::new(1),
            coil_b1: PinConfig::new(3),
            coil_b2: PinConfig::new(2),
            button: PinConfig::with_pullup(8),
        }
    }
}

impl PinsConfig {
    /// Coil pins in excitation order (A1, A2, B1, B2)
    pub fn coils(&self) -> [PinConfig; 4] {
        [self.coil_a1, self.coil_a2, self.coil_b1, self.coil_b2]
    }

    /// Every configured pin, coils first
    pub fn all(&self) -> [PinConfig; 5] {
        [
            self.coil_a1,
            self.coil_a2,
            self.coil_b1,
            self.coil_b2,
            self.button,
        ]
    }
}

/// Step and rotation timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionConfig {
    /// Step emissions per rotation
    pub steps_per_rotation: u32,
    /// Phase hold at multiplier 1 (microseconds)
    pub step_hold_us: u32,
    /// Gap between emissions at multiplier 1 (microseconds)
    pub step_gap_us: u32,
    /// Pause after each rotation (milliseconds)
    pub settle_pause_ms: u32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            steps_per_rotation: DEFAULT_STEPS_PER_ROTATION,
            step_hold_us: DEFAULT_STEP_HOLD_US,
            step_gap_us: DEFAULT_STEP_GAP_US,
            settle_pause_ms: DEFAULT_SETTLE_PAUSE_MS,
        }
    }
}

impl MotionConfig {
    /// Step timing at a given speed
    pub fn timing_for(&self, multiplier: SpeedMultiplier) -> Result<StepTiming, TimingError> {
        StepTiming::scaled(self.step_hold_us, self.step_gap_us, multiplier)
    }
}

/// Button behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonConfig {
    /// Settle time after a press (milliseconds)
    pub debounce_ms: u32,
    /// Sleep per loop while stopped (milliseconds)
    pub idle_poll_ms: u32,
    /// Run flag at power-on
    pub start_running: bool,
    /// Pressed reads LOW
    pub active_low: bool,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            idle_poll_ms: DEFAULT_IDLE_POLL_MS,
            start_running: true,
            active_low: true,
        }
    }
}

/// Serial console
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConsoleConfig {
    pub baudrate: u32,
    /// Wait before the first line (milliseconds)
    pub boot_delay_ms: u32,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            baudrate: DEFAULT_BAUDRATE,
            boot_delay_ms: DEFAULT_BOOT_DELAY_MS,
        }
    }
}

/// Mode selection strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SelectorKind {
    /// Fixed 1 → 2 → 3 → 4 cycle
    #[default]
    Cycle,
    /// Ambient light driven
    Light,
}

/// Light selector settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LightConfig {
    /// Placeholder smoothed intensity
    pub level: u16,
    /// Placeholder rate of change
    pub rate: i16,
    pub thresholds: LightThresholds,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            level: 1200,
            rate: 30,
            thresholds: LightThresholds::default(),
        }
    }
}

/// Mode speeds and selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModesConfig {
    pub speeds: ModeSpeeds,
    pub selector: SelectorKind,
    pub light: LightConfig,
}

/// Complete device configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceConfig {
    pub pins: PinsConfig,
    pub motion: MotionConfig,
    pub button: ButtonConfig,
    pub console: ConsoleConfig,
    pub modes: ModesConfig,
}

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Pin number beyond the chip's GPIO range
    PinOutOfRange(u8),
    /// Same GPIO assigned twice
    DuplicatePin(u8),
    /// A rotation must have at least one step
    ZeroSteps,
    /// A speed would scale a step delay down to nothing
    Timing(TimingError),
    /// Console baud rate of zero
    ZeroBaudrate,
}

impl From<TimingError> for ConfigError {
    fn from(e: TimingError) -> Self {
        ConfigError::Timing(e)
    }
}

impl DeviceConfig {
    /// Check the configuration before building hardware from it
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let pins = self.pins.all();
        for (i, p) in pins.iter().enumerate() {
            if p.pin >= GPIO_COUNT {
                return Err(ConfigError::PinOutOfRange(p.pin));
            }
            if pins[..i].iter().any(|q| q.pin == p.pin) {
                return Err(ConfigError::DuplicatePin(p.pin));
            }
        }

        if self.motion.steps_per_rotation == 0 {
            return Err(ConfigError::ZeroSteps);
        }

        self.motion.timing_for(self.modes.speeds.normal)?;
        self.motion.timing_for(self.modes.speeds.fast)?;

        if self.console.baudrate == 0 {
            return Err(ConfigError::ZeroBaudrate);
        }

        Ok(())
    }

    /// Button pressed level is LOW, after pin inversion
    pub fn button_active_low(&self) -> bool {
        self.button.active_low != self.pins.button.inverted
    }
}

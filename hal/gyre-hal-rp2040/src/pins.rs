//! Dynamic pin allocation for config-driven hardware setup
//!
//! Provides a way to get GPIO pins by number at runtime, so coil and
//! button assignments can come from the device config file. GPIO 16/17
//! carry the UART0 status console and are never handed out.

use embassy_rp::gpio::AnyPin;
use embassy_rp::peripherals::{PIN_16, PIN_17, UART0};
use embassy_rp::{Peri, Peripherals};

/// Number of GPIO pins on the RP2040
pub const GPIO_COUNT: usize = 30;

/// UART0 TX, reserved for the console
pub const CONSOLE_TX_PIN: u8 = 16;

/// UART0 RX, reserved for the console
pub const CONSOLE_RX_PIN: u8 = 17;

/// Error when requesting a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number out of range (0-29 valid)
    InvalidPin,
    /// Pin already taken
    AlreadyTaken,
    /// Pin reserved for special function
    Reserved,
}

/// Check that a pin number may be requested at all
pub fn check_pin(pin_num: u8) -> Result<(), PinError> {
    if pin_num as usize >= GPIO_COUNT {
        return Err(PinError::InvalidPin);
    }
    if pin_num == CONSOLE_TX_PIN || pin_num == CONSOLE_RX_PIN {
        return Err(PinError::Reserved);
    }
    Ok(())
}

/// Pin bank that holds the free GPIO pins and allows taking them by number
pub struct PinBank {
    pins: [Option<Peri<'static, AnyPin>>; GPIO_COUNT],
}

/// Console UART and its pins
pub struct ConsolePins {
    pub tx: Peri<'static, PIN_16>,
    pub rx: Peri<'static, PIN_17>,
}

/// Peripherals that stay outside the pin bank
pub struct RemainingPeripherals {
    pub uart0: Peri<'static, UART0>,
    pub console: ConsolePins,
}

impl PinBank {
    /// Split the chip peripherals into a pin bank and everything else
    pub fn split(p: Peripherals) -> (Self, RemainingPeripherals) {
        let bank = Self {
            pins: [
                Some(p.PIN_0.into()),
                Some(p.PIN_1.into()),
                Some(p.PIN_2.into()),
                Some(p.PIN_3.into()),
                Some(p.PIN_4.into()),
                Some(p.PIN_5.into()),
                Some(p.PIN_6.into()),
                Some(p.PIN_7.into()),
                Some(p.PIN_8.into()),
                Some(p.PIN_9.into()),
                Some(p.PIN_10.into()),
                Some(p.PIN_11.into()),
                Some(p.PIN_12.into()),
                Some(p.PIN_13.into()),
                Some(p.PIN_14.into()),
                Some(p.PIN_15.into()),
                None, // console TX
                None, // console RX
                Some(p.PIN_18.into()),
                Some(p.PIN_19.into()),
                Some(p.PIN_20.into()),
                Some(p.PIN_21.into()),
                Some(p.PIN_22.into()),
                Some(p.PIN_23.into()),
                Some(p.PIN_24.into()),
                Some(p.PIN_25.into()),
                Some(p.PIN_26.into()),
                Some(p.PIN_27.into()),
                Some(p.PIN_28.into()),
                Some(p.PIN_29.into()),
            ],
        };
        let remaining = RemainingPeripherals {
            uart0: p.UART0,
            console: ConsolePins {
                tx: p.PIN_16,
                rx: p.PIN_17,
            },
        };
        (bank, remaining)
    }

    /// Take a pin by number
    pub fn take(&mut self, pin_num: u8) -> Result<Peri<'static, AnyPin>, PinError> {
        check_pin(pin_num)?;
        self.pins[pin_num as usize]
            .take()
            .ok_or(PinError::AlreadyTaken)
    }
}

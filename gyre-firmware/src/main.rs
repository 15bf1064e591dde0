//! Gyre - Stepper Turntable Firmware
//!
//! Main firmware binary for RP2040 boards driving a 28BYJ-48 style
//! four-coil stepper through a ULN2003 board. One push-button toggles
//! the motor; while running it turns one full rotation per mode, rests,
//! and moves on to the next mode.
//!
//! Everything runs in the main task. Awaiting a delay is the only
//! suspension point.

#![no_std]
#![no_main]

use core::ops::ControlFlow;

use defmt::*;
use embassy_executor::Spawner;
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use gyre_core::config::DeviceConfig;
use gyre_core::controller::{Controller, Cycle};
use gyre_core::selector::AnySelector;
use gyre_drivers::{idle_level, FourWireCoils, SerialConsole};
use gyre_hal::UartConfig;
use gyre_hal_rp2040::{ConsoleTx, PinBank, PinError, RpInput, RpOutput};

mod config;
mod console;

use console::LoggedConsole;

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Gyre firmware starting...");

    let p = embassy_rp::init(Default::default());
    let (mut bank, rest) = PinBank::split(p);
    info!("Peripherals initialized");

    let config = config::load();
    debug!("Config: {}", config);

    let uart_config = UartConfig::with_baudrate(config.console.baudrate);
    let tx = ConsoleTx::new(rest.uart0, rest.console.tx, &uart_config);
    let console = LoggedConsole::new(SerialConsole::new(tx));

    let (coils, button) = match take_io(&mut bank, &config) {
        Ok(io) => io,
        Err(e) => {
            error!("Pin setup failed: {}", e);
            halt();
        }
    };

    let selector = AnySelector::from_config(&config.modes);
    let mut controller = match Controller::new(coils, button, console, selector, config) {
        Ok(controller) => controller,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            halt();
        }
    };

    let mut rotations: u32 = 0;
    let mut dropped_seen: u32 = 0;
    info!("Entering main loop");
    controller
        .run(&mut Delay, |cycle, console| {
            match cycle {
                Cycle::Rotated(report) => {
                    rotations = rotations.wrapping_add(1);
                    debug!(
                        "Rotation {}: {} steps {} x{}",
                        rotations,
                        report.steps,
                        report.direction,
                        report.multiplier.get()
                    );
                }
                Cycle::Idle => trace!("Idle"),
            }

            let dropped = console.inner().dropped_lines();
            if dropped != dropped_seen {
                warn!("Console dropped {} lines", dropped - dropped_seen);
                dropped_seen = dropped;
            }
            ControlFlow::Continue(())
        })
        .await;
}

/// Claim the coil outputs and the button input from the pin bank
fn take_io(
    bank: &mut PinBank,
    config: &DeviceConfig,
) -> Result<(FourWireCoils<RpOutput>, RpInput), PinError> {
    let [a1, a2, b1, b2] = config.pins.coils();
    let outputs = [
        RpOutput::new(bank.take(a1.pin)?, idle_level(a1.inverted)),
        RpOutput::new(bank.take(a2.pin)?, idle_level(a2.inverted)),
        RpOutput::new(bank.take(b1.pin)?, idle_level(b1.inverted)),
        RpOutput::new(bank.take(b2.pin)?, idle_level(b2.inverted)),
    ];
    let inverted = config.pins.coils().map(|p| p.inverted);
    let coils = FourWireCoils::with_inversion(outputs, inverted);

    let button_pin = config.pins.button;
    let button = RpInput::new(bank.take(button_pin.pin)?, button_pin.pull_up);

    Ok((coils, button))
}

/// Stop here after an unrecoverable setup error
fn halt() -> ! {
    loop {
        cortex_m::asm::wfi();
    }
}

//! Blocking UART transmitter for the status console

use embassy_rp::uart::{self, Blocking, Instance, TxPin};
use embassy_rp::Peri;
use gyre_hal::uart::{DataBits, Parity, StopBits, UartConfig};

/// Write-only UART used by the serial console
pub struct ConsoleTx {
    tx: uart::UartTx<'static, Blocking>,
}

impl ConsoleTx {
    /// Configure a UART instance for transmit only
    pub fn new<T: Instance>(
        peripheral: Peri<'static, T>,
        tx_pin: Peri<'static, impl TxPin<T>>,
        config: &UartConfig,
    ) -> Self {
        Self {
            tx: uart::UartTx::new_blocking(peripheral, tx_pin, to_rp_config(config)),
        }
    }
}

fn to_rp_config(config: &UartConfig) -> uart::Config {
    let mut rp = uart::Config::default();
    rp.baudrate = config.baudrate;
    rp.data_bits = match config.data_bits {
        DataBits::Seven => uart::DataBits::DataBits7,
        DataBits::Eight => uart::DataBits::DataBits8,
    };
    rp.parity = match config.parity {
        Parity::None => uart::Parity::ParityNone,
        Parity::Even => uart::Parity::ParityEven,
        Parity::Odd => uart::Parity::ParityOdd,
    };
    rp.stop_bits = match config.stop_bits {
        StopBits::One => uart::StopBits::STOP1,
        StopBits::Two => uart::StopBits::STOP2,
    };
    rp
}

impl gyre_hal::UartTx for ConsoleTx {
    type Error = uart::Error;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.tx.blocking_write(data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.tx.blocking_flush()
    }
}

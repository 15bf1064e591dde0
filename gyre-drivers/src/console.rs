//! Serial status console
//!
//! Writes each status line, CRLF terminated, to a blocking UART. The
//! console is observational: a failed write is counted and dropped, and
//! never reaches the caller.

use core::fmt::Write;

use gyre_core::status::{StatusLine, MAX_LINE_LEN};
use gyre_core::traits::StatusSink;
use gyre_hal::UartTx;
use heapless::String;

/// Line buffer: longest status line plus CRLF
pub type LineBuffer = String<{ MAX_LINE_LEN + 2 }>;

/// Status sink over a UART transmitter
pub struct SerialConsole<T> {
    tx: T,
    dropped_lines: u32,
}

impl<T: UartTx> SerialConsole<T> {
    pub fn new(tx: T) -> Self {
        Self {
            tx,
            dropped_lines: 0,
        }
    }

    /// Lines that could not be formatted or written
    pub fn dropped_lines(&self) -> u32 {
        self.dropped_lines
    }

    /// Format one line into its wire form
    pub fn render(line: StatusLine) -> Option<LineBuffer> {
        let mut buf = LineBuffer::new();
        write!(buf, "{}\r\n", line).ok()?;
        Some(buf)
    }

    fn write_line(&mut self, line: StatusLine) -> Result<(), ()> {
        let buf = Self::render(line).ok_or(())?;
        self.tx.write_blocking(buf.as_bytes()).map_err(|_| ())?;
        self.tx.flush().map_err(|_| ())
    }
}

impl<T: UartTx> StatusSink for SerialConsole<T> {
    fn emit(&mut self, line: StatusLine) {
        if self.write_line(line).is_err() {
            self.dropped_lines = self.dropped_lines.saturating_add(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gyre_core::motion::SpeedMultiplier;
    use gyre_core::state::Mode;
    use gyre_core::traits::Direction;
    use heapless::Vec;

    /// Mock UART that captures written bytes
    #[derive(Default)]
    struct MockUart {
        written: Vec<u8, 512>,
        flushes: u32,
        fail: bool,
    }

    impl UartTx for MockUart {
        type Error = ();

        fn write_blocking(&mut self, data: &[u8]) -> Result<(), ()> {
            if self.fail {
                return Err(());
            }
            self.written.extend_from_slice(data).map_err(|_| ())
        }

        fn flush(&mut self) -> Result<(), ()> {
            self.flushes += 1;
            Ok(())
        }
    }

    #[test]
    fn test_lines_are_crlf_terminated() {
        let mut console = SerialConsole::new(MockUart::default());

        console.emit(StatusLine::ModeBanner(Mode::FastCw));
        console.emit(StatusLine::Pause { ms: 1_000 });

        assert_eq!(
            console.tx.written.as_slice(),
            b"Mode 3: Fast CW\r\nPause 1s\r\n"
        );
        assert_eq!(console.tx.flushes, 2);
        assert_eq!(console.dropped_lines(), 0);
    }

    #[test]
    fn test_rotation_line() {
        let mut console = SerialConsole::new(MockUart::default());

        console.emit(StatusLine::RotationStart {
            direction: Direction::Clockwise,
            multiplier: SpeedMultiplier::NORMAL,
        });

        assert_eq!(
            console.tx.written.as_slice(),
            b"Clockwise | Speed multiplier: 1\r\n"
        );
    }

    #[test]
    fn test_write_failure_is_counted() {
        let mut console = SerialConsole::new(MockUart {
            fail: true,
            ..Default::default()
        });

        console.emit(StatusLine::Stopped);
        console.emit(StatusLine::Stopped);

        assert_eq!(console.dropped_lines(), 2);
        assert!(console.tx.written.is_empty());
    }

    #[test]
    fn test_render_fits_buffer() {
        let longest = StatusLine::RotationStart {
            direction: Direction::CounterClockwise,
            multiplier: SpeedMultiplier::new(255).unwrap(),
        };
        let buf = SerialConsole::<MockUart>::render(longest).unwrap();
        assert!(buf.ends_with("\r\n"));
    }
}

//! Status console with defmt mirror
//!
//! Every status line goes to the serial console and to the defmt log,
//! so a probe-attached board shows the same output as the UART.

use defmt::{info, Display2Format};

use gyre_core::status::StatusLine;
use gyre_core::traits::StatusSink;

/// Sink wrapper that logs each line before forwarding it
pub struct LoggedConsole<S> {
    inner: S,
}

impl<S: StatusSink> LoggedConsole<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: StatusSink> StatusSink for LoggedConsole<S> {
    fn emit(&mut self, line: StatusLine) {
        info!("{}", Display2Format(&line));
        self.inner.emit(line);
    }
}

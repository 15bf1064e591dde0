//! Status output trait

use crate::status::StatusLine;

/// Receiver for human-readable status lines
///
/// Sinks are purely observational. They cannot fail from the caller's
/// point of view; a sink that loses a line keeps its own count.
pub trait StatusSink {
    /// Emit one status line
    fn emit(&mut self, line: StatusLine);
}

impl<T: StatusSink + ?Sized> StatusSink for &mut T {
    fn emit(&mut self, line: StatusLine) {
        T::emit(self, line)
    }
}

//! Hardware abstraction traits
//!
//! These traits define the interface between the turntable logic
//! and hardware-specific implementations.

pub mod coil;
pub mod console;
pub mod selector;
pub mod stepper;

pub use coil::CoilDriver;
pub use console::StatusSink;
pub use selector::{LightReading, LightSource, ModeSelector};
pub use stepper::Direction;

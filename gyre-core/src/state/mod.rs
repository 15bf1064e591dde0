//! Motor state machine
//!
//! The device state is explicit and owned by the controller; there are
//! no process-wide globals.

pub mod events;
pub mod machine;
pub mod mode;

pub use events::Event;
pub use machine::MotorState;
pub use mode::{Mode, ModeSpeeds};

//! Step emission and rotation driving
//!
//! Turns a direction and speed multiplier into a timed sequence of coil
//! patterns.

pub mod rotation;
pub mod timing;

pub use rotation::{emit_step, rotate, RotationReport, RotationRequest};
pub use timing::{SpeedMultiplier, StepTiming, TimingError};

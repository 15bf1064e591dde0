//! Full-rotation driver
//!
//! A rotation is a fixed number of step emissions followed by a settle
//! pause. Once started it always runs to completion; the button is only
//! looked at between rotations.

use embedded_hal_async::delay::DelayNs;

use super::timing::{SpeedMultiplier, StepTiming};
use crate::excitation::Phase;
use crate::status::StatusLine;
use crate::traits::{CoilDriver, Direction, StatusSink};

/// Steps per mechanical revolution of the output shaft
pub const DEFAULT_STEPS_PER_ROTATION: u32 = 512;

/// Pause after each full rotation (milliseconds)
pub const DEFAULT_SETTLE_PAUSE_MS: u32 = 1_000;

/// Everything needed to drive one rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RotationRequest {
    pub direction: Direction,
    pub multiplier: SpeedMultiplier,
    pub timing: StepTiming,
    pub steps: u32,
    pub settle_pause_ms: u32,
}

/// Summary of a completed rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RotationReport {
    /// Step emissions performed
    pub steps: u32,
    pub direction: Direction,
    pub multiplier: SpeedMultiplier,
}

/// Apply one phase to the coils and hold it for `hold_us`
pub async fn emit_step<C, D>(coils: &mut C, delay: &mut D, phase: Phase, hold_us: u32)
where
    C: CoilDriver,
    D: DelayNs,
{
    coils.energize(phase.pattern());
    delay.delay_us(hold_us).await;
}

/// Drive one full rotation
pub async fn rotate<C, D, S>(
    coils: &mut C,
    delay: &mut D,
    sink: &mut S,
    request: &RotationRequest,
) -> RotationReport
where
    C: CoilDriver,
    D: DelayNs,
    S: StatusSink,
{
    sink.emit(StatusLine::RotationStart {
        direction: request.direction,
        multiplier: request.multiplier,
    });

    for step in 0..request.steps {
        let phase = Phase::for_step(step, request.direction);
        emit_step(coils, delay, phase, request.timing.hold_us).await;
        delay.delay_us(request.timing.gap_us).await;
    }

    sink.emit(StatusLine::Pause {
        ms: request.settle_pause_ms,
    });
    delay.delay_ms(request.settle_pause_ms).await;

    RotationReport {
        steps: request.steps,
        direction: request.direction,
        multiplier: request.multiplier,
    }
}

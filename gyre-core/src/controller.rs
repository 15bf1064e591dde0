//! Turntable controller
//!
//! Owns the hardware handles and the motor state, and runs the outer loop:
//! sample the button, then either drive one full rotation or idle briefly.
//! Everything runs in one task; awaiting a delay is the only suspension
//! point.

use core::ops::ControlFlow;

use embedded_hal_async::delay::DelayNs;
use gyre_hal::InputPin;

use crate::config::{ConfigError, DeviceConfig};
use crate::input::{ButtonEdge, ToggleButton};
use crate::motion::{rotate, RotationReport, RotationRequest, StepTiming};
use crate::state::{Event, Mode, MotorState};
use crate::status::StatusLine;
use crate::traits::{CoilDriver, ModeSelector, StatusSink};

/// Outcome of one loop iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Cycle {
    /// A full rotation was driven
    Rotated(RotationReport),
    /// Motor is stopped; nothing was driven
    Idle,
}

/// Main turntable controller
pub struct Controller<C, B, S, M> {
    coils: C,
    button_pin: B,
    sink: S,
    selector: M,
    config: DeviceConfig,
    state: MotorState,
    button: ToggleButton,
    normal_timing: StepTiming,
    fast_timing: StepTiming,
}

impl<C, B, S, M> Controller<C, B, S, M>
where
    C: CoilDriver,
    B: InputPin,
    S: StatusSink,
    M: ModeSelector,
{
    /// Create a controller from a validated configuration
    pub fn new(
        coils: C,
        button_pin: B,
        sink: S,
        selector: M,
        config: DeviceConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let normal_timing = config.motion.timing_for(config.modes.speeds.normal)?;
        let fast_timing = config.motion.timing_for(config.modes.speeds.fast)?;

        Ok(Self {
            coils,
            button_pin,
            sink,
            selector,
            state: MotorState::new(config.button.start_running),
            button: ToggleButton::new(config.button_active_low(), config.button.debounce_ms),
            config,
            normal_timing,
            fast_timing,
        })
    }

    /// Wait for the console to come up, then report readiness
    pub async fn announce_boot<D: DelayNs>(&mut self, delay: &mut D) {
        delay.delay_ms(self.config.console.boot_delay_ms).await;
        self.sink.emit(StatusLine::Booted);
        self.sink.emit(StatusLine::Ready);
    }

    /// Run one iteration of the outer loop
    pub async fn poll_once<D: DelayNs>(&mut self, delay: &mut D) -> Cycle {
        if self.button.sample(&self.button_pin) == ButtonEdge::Pressed {
            self.state = self.state.transition(Event::ButtonPressed);
            self.sink.emit(StatusLine::ButtonPressed {
                running: self.state.running,
            });
            self.button.settle(delay).await;
        }

        if !self.state.running {
            self.sink.emit(StatusLine::Stopped);
            delay.delay_ms(self.config.button.idle_poll_ms).await;
            return Cycle::Idle;
        }

        let mode = self.state.mode;
        self.sink.emit(StatusLine::MotorState(mode));
        self.sink.emit(StatusLine::ModeBanner(mode));

        let request = self.request_for(mode);
        let report = rotate(&mut self.coils, delay, &mut self.sink, &request).await;

        let next = self.selector.select_next(mode);
        self.state = self.state.transition(Event::RotationComplete { next });

        Cycle::Rotated(report)
    }

    /// Announce boot, then poll until `on_cycle` breaks
    ///
    /// `on_cycle` sees every loop outcome along with the status sink.
    /// Firmware always continues, so there this never returns.
    pub async fn run<D, F>(&mut self, delay: &mut D, mut on_cycle: F)
    where
        D: DelayNs,
        F: FnMut(Cycle, &S) -> ControlFlow<()>,
    {
        self.announce_boot(delay).await;
        loop {
            let cycle = self.poll_once(delay).await;
            if on_cycle(cycle, &self.sink).is_break() {
                return;
            }
        }
    }

    fn request_for(&self, mode: Mode) -> RotationRequest {
        RotationRequest {
            direction: mode.direction(),
            multiplier: self.config.modes.speeds.multiplier(mode),
            timing: if mode.is_fast() {
                self.fast_timing
            } else {
                self.normal_timing
            },
            steps: self.config.motion.steps_per_rotation,
            settle_pause_ms: self.config.motion.settle_pause_ms,
        }
    }

    /// Current motor state
    pub fn state(&self) -> MotorState {
        self.state
    }

    pub fn coils(&self) -> &C {
        &self.coils
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::excitation::EXCITATION_TABLE;
    use crate::motion::SpeedMultiplier;
    use crate::selector::{AnySelector, CycleSelector};
    use crate::testing::{CoilRecorder, RecordingSink, ScriptedButton, SimClock, SimDelay};
    use crate::traits::Direction;
    use embassy_futures::block_on;

    /// One rotation at multiplier 1: 512 * (5 ms + 5 ms) + 1 s
    const NORMAL_ROTATION_US: u64 = 512 * 10_000 + 1_000_000;

    type TestController<'a> =
        Controller<CoilRecorder, ScriptedButton<'a>, RecordingSink, CycleSelector>;

    fn controller<'a>(button: ScriptedButton<'a>, config: DeviceConfig) -> TestController<'a> {
        Controller::new(
            CoilRecorder::new(),
            button,
            RecordingSink::new(),
            CycleSelector,
            config,
        )
        .unwrap()
    }

    fn stopped_config() -> DeviceConfig {
        let mut config = DeviceConfig::default();
        config.button.start_running = false;
        config
    }

    #[test]
    fn test_boot_lines() {
        let clock = SimClock::new();
        let mut delay = SimDelay::new(&clock);
        let mut ctrl = controller(ScriptedButton::released(&clock), DeviceConfig::default());

        block_on(ctrl.announce_boot(&mut delay));

        assert_eq!(clock.now_us(), 1_000_000);
        assert_eq!(
            ctrl.sink().lines.as_slice(),
            &[StatusLine::Booted, StatusLine::Ready]
        );
        assert_eq!(ctrl.coils().writes, 0);
    }

    #[test]
    fn test_run_boots_then_cycles_modes() {
        let clock = SimClock::new();
        let mut delay = SimDelay::new(&clock);
        let mut ctrl = controller(ScriptedButton::released(&clock), DeviceConfig::default());

        let mut seen = [None; 4];
        let mut cycles = 0;
        block_on(ctrl.run(&mut delay, |cycle, sink| {
            if let Cycle::Rotated(report) = cycle {
                seen[cycles] = Some((report.direction, report.multiplier.get()));
            }
            cycles += 1;
            // Each rotation adds four lines after the two boot lines
            assert_eq!(sink.lines.len(), 2 + 4 * cycles);
            if cycles == 4 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        }));

        assert_eq!(
            seen,
            [
                Some((Direction::Clockwise, 1)),
                Some((Direction::CounterClockwise, 1)),
                Some((Direction::Clockwise, 2)),
                Some((Direction::CounterClockwise, 2)),
            ]
        );
        assert_eq!(
            &ctrl.sink().lines[..3],
            &[
                StatusLine::Booted,
                StatusLine::Ready,
                StatusLine::MotorState(Mode::NormalCw)
            ]
        );
        assert_eq!(ctrl.coils().writes, 4 * 512);
        assert_eq!(ctrl.state().mode, Mode::NormalCw);
        // Boot delay, two normal rotations, two fast ones
        assert_eq!(
            clock.now_us(),
            1_000_000 + 2 * NORMAL_ROTATION_US + 2 * (512 * 5_000 + 1_000_000)
        );
    }

    #[test]
    fn test_run_while_stopped_only_idles() {
        let clock = SimClock::new();
        let mut delay = SimDelay::new(&clock);
        let mut ctrl = controller(ScriptedButton::released(&clock), stopped_config());

        let mut idles = 0;
        block_on(ctrl.run(&mut delay, |cycle, _| {
            assert_eq!(cycle, Cycle::Idle);
            idles += 1;
            if idles == 3 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        }));

        assert_eq!(ctrl.coils().writes, 0);
        assert_eq!(ctrl.sink().count(StatusLine::Stopped), 3);
        assert_eq!(clock.now_us(), 1_000_000 + 3 * 100_000);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let clock = SimClock::new();
        let mut config = DeviceConfig::default();
        config.motion.steps_per_rotation = 0;

        let result = Controller::new(
            CoilRecorder::new(),
            ScriptedButton::released(&clock),
            RecordingSink::new(),
            CycleSelector,
            config,
        );
        assert!(matches!(result, Err(ConfigError::ZeroSteps)));
    }

    #[test]
    fn test_first_rotation_is_mode_one() {
        let clock = SimClock::new();
        let mut delay = SimDelay::new(&clock);
        let mut ctrl = controller(ScriptedButton::released(&clock), DeviceConfig::default());

        let cycle = block_on(ctrl.poll_once(&mut delay));

        assert_eq!(
            cycle,
            Cycle::Rotated(RotationReport {
                steps: 512,
                direction: Direction::Clockwise,
                multiplier: SpeedMultiplier::NORMAL,
            })
        );
        assert_eq!(
            ctrl.sink().lines.as_slice(),
            &[
                StatusLine::MotorState(Mode::NormalCw),
                StatusLine::ModeBanner(Mode::NormalCw),
                StatusLine::RotationStart {
                    direction: Direction::Clockwise,
                    multiplier: SpeedMultiplier::NORMAL,
                },
                StatusLine::Pause { ms: 1_000 },
            ]
        );
        assert_eq!(ctrl.coils().writes, 512);
        assert_eq!(clock.now_us(), NORMAL_ROTATION_US);
        assert_eq!(ctrl.state().mode, Mode::NormalCcw);
    }

    #[test]
    fn test_modes_cycle_through_all_four() {
        let clock = SimClock::new();
        let mut delay = SimDelay::new(&clock);
        let mut ctrl = controller(ScriptedButton::released(&clock), DeviceConfig::default());

        let mut reports = [None; 5];
        for slot in reports.iter_mut() {
            if let Cycle::Rotated(report) = block_on(ctrl.poll_once(&mut delay)) {
                *slot = Some((report.direction, report.multiplier.get()));
            }
        }

        assert_eq!(
            reports,
            [
                Some((Direction::Clockwise, 1)),
                Some((Direction::CounterClockwise, 1)),
                Some((Direction::Clockwise, 2)),
                Some((Direction::CounterClockwise, 2)),
                Some((Direction::Clockwise, 1)),
            ]
        );
        assert_eq!(ctrl.sink().count(StatusLine::ModeBanner(Mode::FastCcw)), 1);
        assert_eq!(ctrl.sink().count(StatusLine::ModeBanner(Mode::NormalCw)), 2);
        assert_eq!(ctrl.state().mode, Mode::NormalCcw);
    }

    #[test]
    fn test_fast_rotation_timing() {
        let clock = SimClock::new();
        let mut delay = SimDelay::new(&clock);
        let mut ctrl = controller(ScriptedButton::released(&clock), DeviceConfig::default());

        block_on(ctrl.poll_once(&mut delay));
        block_on(ctrl.poll_once(&mut delay));
        let before = clock.now_us();
        block_on(ctrl.poll_once(&mut delay));

        // Mode 3: 512 * (2.5 ms + 2.5 ms) + 1 s
        assert_eq!(clock.now_us() - before, 512 * 5_000 + 1_000_000);
    }

    #[test]
    fn test_stopped_leaves_coils_untouched() {
        let clock = SimClock::new();
        let mut delay = SimDelay::new(&clock);
        let mut ctrl = controller(ScriptedButton::released(&clock), stopped_config());

        for _ in 0..5 {
            assert_eq!(block_on(ctrl.poll_once(&mut delay)), Cycle::Idle);
        }

        assert_eq!(ctrl.coils().writes, 0);
        assert_eq!(ctrl.coils().current(), None);
        assert_eq!(ctrl.sink().count(StatusLine::Stopped), 5);
        assert_eq!(delay.count_of(100_000), 5);
        assert_eq!(clock.now_us(), 500_000);
        assert_eq!(ctrl.state().mode, Mode::NormalCw);
    }

    #[test]
    fn test_press_while_stopped_starts_motor() {
        let clock = SimClock::new();
        let mut delay = SimDelay::new(&clock);
        let button = ScriptedButton::new(&clock, &[(0, false), (50_000, true)]);
        let mut ctrl = controller(button, stopped_config());

        let cycle = block_on(ctrl.poll_once(&mut delay));

        assert!(matches!(cycle, Cycle::Rotated(_)));
        assert!(ctrl.state().running);
        assert_eq!(
            ctrl.sink().lines.first(),
            Some(&StatusLine::ButtonPressed { running: true })
        );
        // Settle delay comes before the first step
        assert_eq!(delay.log.first(), Some(&300_000));
        assert_eq!(clock.now_us(), 300_000 + NORMAL_ROTATION_US);
    }

    #[test]
    fn test_press_during_rotation_is_seen_after_it() {
        let clock = SimClock::new();
        let mut delay = SimDelay::new(&clock);
        // Pressed 1 s into the first rotation and held past its end
        let button = ScriptedButton::new(&clock, &[(1_000_000, false), (7_000_000, true)]);
        let mut ctrl = controller(button, DeviceConfig::default());

        let first = block_on(ctrl.poll_once(&mut delay));
        assert!(matches!(first, Cycle::Rotated(_)));
        assert_eq!(ctrl.coils().writes, 512);
        assert!(ctrl.state().running);

        let second = block_on(ctrl.poll_once(&mut delay));
        assert_eq!(second, Cycle::Idle);
        assert!(!ctrl.state().running);
        assert_eq!(ctrl.coils().writes, 512);
        assert_eq!(
            ctrl.sink().count(StatusLine::ButtonPressed { running: false }),
            1
        );
        // Mode still advanced after the completed rotation
        assert_eq!(ctrl.state().mode, Mode::NormalCcw);
    }

    #[test]
    fn test_held_button_toggles_once() {
        let clock = SimClock::new();
        let mut delay = SimDelay::new(&clock);
        let button = ScriptedButton::new(&clock, &[(0, false)]);
        let mut ctrl = controller(button, DeviceConfig::default());

        for _ in 0..20 {
            block_on(ctrl.poll_once(&mut delay));
        }

        assert!(!ctrl.state().running);
        assert_eq!(ctrl.sink().count(StatusLine::ButtonPressed { running: false }), 1);
        assert_eq!(ctrl.sink().count(StatusLine::Stopped), 20);
    }

    #[test]
    fn test_bounce_after_press_ignored() {
        let clock = SimClock::new();
        let mut delay = SimDelay::new(&clock);
        // Chatter for 60 ms after the press, then released
        let button = ScriptedButton::new(
            &clock,
            &[(0, false), (20_000, true), (40_000, false), (60_000, true)],
        );
        let mut ctrl = controller(button, DeviceConfig::default());

        for _ in 0..30 {
            block_on(ctrl.poll_once(&mut delay));
        }

        assert!(!ctrl.state().running);
        assert_eq!(ctrl.sink().count(StatusLine::ButtonPressed { running: false }), 1);
        assert_eq!(ctrl.sink().count(StatusLine::ButtonPressed { running: true }), 0);
    }

    #[test]
    fn test_rotation_ends_on_last_phase() {
        let clock = SimClock::new();
        let mut delay = SimDelay::new(&clock);
        let mut ctrl = controller(ScriptedButton::released(&clock), DeviceConfig::default());

        block_on(ctrl.poll_once(&mut delay));

        // 512 is a multiple of 4, so clockwise ends on phase 3
        assert_eq!(ctrl.coils().current(), Some(EXCITATION_TABLE[3]));
    }

    #[test]
    fn test_light_selector_holds_mode() {
        let clock = SimClock::new();
        let mut delay = SimDelay::new(&clock);
        let mut config = DeviceConfig::default();
        config.modes.selector = crate::config::SelectorKind::Light;

        let mut ctrl = Controller::new(
            CoilRecorder::new(),
            ScriptedButton::released(&clock),
            RecordingSink::new(),
            AnySelector::from_config(&config.modes),
            config,
        )
        .unwrap();

        block_on(ctrl.poll_once(&mut delay));
        block_on(ctrl.poll_once(&mut delay));

        assert_eq!(ctrl.sink().count(StatusLine::ModeBanner(Mode::NormalCw)), 2);
    }
}

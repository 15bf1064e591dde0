//! Simulated hardware for host tests
//!
//! A single [`SimClock`] is shared by the delay and the button so that
//! scripted button levels line up with the time the controller has spent
//! sleeping.

use core::cell::Cell;

use embedded_hal_async::delay::DelayNs;
use gyre_hal::InputPin;
use heapless::Vec;

use crate::excitation::CoilPattern;
use crate::status::StatusLine;
use crate::traits::{CoilDriver, StatusSink};

/// Simulated monotonic time in microseconds
#[derive(Debug, Default)]
pub struct SimClock {
    now_us: Cell<u64>,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_us(&self) -> u64 {
        self.now_us.get()
    }

    pub fn advance_us(&self, us: u64) {
        self.now_us.set(self.now_us.get() + us);
    }
}

/// Delay that advances a [`SimClock`] and records each request
pub struct SimDelay<'a> {
    clock: &'a SimClock,
    /// First requests, in microseconds
    pub log: Vec<u64, 2048>,
    /// Total number of requests
    pub calls: usize,
}

impl<'a> SimDelay<'a> {
    pub fn new(clock: &'a SimClock) -> Self {
        Self {
            clock,
            log: Vec::new(),
            calls: 0,
        }
    }

    fn record(&mut self, us: u64) {
        self.clock.advance_us(us);
        self.calls += 1;
        let _ = self.log.push(us);
    }

    /// Number of recorded requests with exactly `us` microseconds
    pub fn count_of(&self, us: u64) -> usize {
        self.log.iter().filter(|&&d| d == us).count()
    }
}

impl DelayNs for SimDelay<'_> {
    async fn delay_ns(&mut self, ns: u32) {
        self.record(ns as u64 / 1_000);
    }

    async fn delay_us(&mut self, us: u32) {
        self.record(us as u64);
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.record(ms as u64 * 1_000);
    }
}

/// Coil driver that records every pattern it is given
#[derive(Default)]
pub struct CoilRecorder {
    pub history: Vec<CoilPattern, 2048>,
    pub writes: usize,
    current: Option<CoilPattern>,
}

impl CoilRecorder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CoilDriver for CoilRecorder {
    fn energize(&mut self, pattern: CoilPattern) {
        self.writes += 1;
        self.current = Some(pattern);
        let _ = self.history.push(pattern);
    }

    fn current(&self) -> Option<CoilPattern> {
        self.current
    }
}

/// Button whose level follows a time script
///
/// Each entry `(at_us, high)` sets the level from that instant on. The pin
/// reads high (released) before the first entry.
pub struct ScriptedButton<'a> {
    clock: &'a SimClock,
    script: Vec<(u64, bool), 32>,
}

impl<'a> ScriptedButton<'a> {
    pub fn new(clock: &'a SimClock, script: &[(u64, bool)]) -> Self {
        let mut s = Vec::new();
        for &entry in script {
            let _ = s.push(entry);
        }
        Self { clock, script: s }
    }

    /// Button that is never pressed
    pub fn released(clock: &'a SimClock) -> Self {
        Self::new(clock, &[])
    }
}

impl InputPin for ScriptedButton<'_> {
    fn is_high(&self) -> bool {
        let now = self.clock.now_us();
        self.script
            .iter()
            .take_while(|(at, _)| *at <= now)
            .last()
            .map(|&(_, high)| high)
            .unwrap_or(true)
    }
}

/// Sink that keeps every emitted line
#[derive(Default)]
pub struct RecordingSink {
    pub lines: Vec<StatusLine, 256>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, line: StatusLine) -> usize {
        self.lines.iter().filter(|&&l| l == line).count()
    }
}

impl StatusSink for RecordingSink {
    fn emit(&mut self, line: StatusLine) {
        let _ = self.lines.push(line);
    }
}

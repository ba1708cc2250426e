//! Shared test infrastructure for button-actions integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use button_actions::{
    ButtonEvent, ButtonEventEngine, ButtonInput, TimeDuration, TimeInstant, TimeSource,
};
use std::cell::{Cell, RefCell};

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    const ZERO: Self = TestDuration(0);

    fn as_millis(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        TestDuration(millis)
    }

    fn saturating_sub(self, other: Self) -> Self {
        TestDuration(self.0.saturating_sub(other.0))
    }
}

/// Mock instant type for testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0.saturating_sub(earlier.0))
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: Cell<TestInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: Cell::new(TestInstant(0)),
        }
    }

    /// Advance time by the given number of milliseconds
    pub fn advance(&self, millis: u64) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + millis));
    }

    pub fn millis(&self) -> u64 {
        self.current_time.get().0
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}

// ============================================================================
// Mock Input
// ============================================================================

/// Input pin whose level is driven by the test through a shared cell
pub struct MockInput<'l> {
    level: &'l Cell<bool>,
    reads: usize,
}

impl<'l> MockInput<'l> {
    pub fn new(level: &'l Cell<bool>) -> Self {
        Self { level, reads: 0 }
    }

    pub fn reads(&self) -> usize {
        self.reads
    }
}

impl ButtonInput for MockInput<'_> {
    fn is_high(&mut self) -> bool {
        self.reads += 1;
        self.level.get()
    }
}

pub type TestEngine<'a, const N: usize> =
    ButtonEventEngine<'a, TestInstant, MockInput<'a>, MockTimeSource, N>;

// ============================================================================
// Event Recording
// ============================================================================

/// Records dispatched events together with the time they fired
pub struct EventLog<'t> {
    timer: &'t MockTimeSource,
    events: RefCell<Vec<(u64, ButtonEvent)>>,
}

impl<'t> EventLog<'t> {
    pub fn new(timer: &'t MockTimeSource) -> Self {
        Self {
            timer,
            events: RefCell::new(Vec::new()),
        }
    }

    pub fn record(&self, event: ButtonEvent) {
        self.events.borrow_mut().push((self.timer.millis(), event));
    }

    /// All events with timestamps
    pub fn entries(&self) -> Vec<(u64, ButtonEvent)> {
        self.events.borrow().clone()
    }

    /// Events without timestamps
    pub fn events(&self) -> Vec<ButtonEvent> {
        self.events.borrow().iter().map(|(_, e)| *e).collect()
    }

    /// Timestamps of one event type
    pub fn times_of(&self, event: ButtonEvent) -> Vec<u64> {
        self.events
            .borrow()
            .iter()
            .filter(|(_, e)| *e == event)
            .map(|(t, _)| *t)
            .collect()
    }

    pub fn count(&self, event: ButtonEvent) -> usize {
        self.times_of(event).len()
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

/// Advance time 1ms at a time, updating the engine after every step
pub fn run_for<const N: usize>(engine: &mut TestEngine<'_, N>, timer: &MockTimeSource, millis: u64) {
    for _ in 0..millis {
        timer.advance(1);
        engine.update();
    }
}

/// Set the raw level and keep it there for `millis`
pub fn drive<const N: usize>(
    engine: &mut TestEngine<'_, N>,
    timer: &MockTimeSource,
    level: &Cell<bool>,
    high: bool,
    millis: u64,
) {
    level.set(high);
    run_for(engine, timer, millis);
}

/// A clean press of `held` ms followed by `gap` ms released
pub fn tap<const N: usize>(
    engine: &mut TestEngine<'_, N>,
    timer: &MockTimeSource,
    level: &Cell<bool>,
    held: u64,
    gap: u64,
) {
    drive(engine, timer, level, true, held);
    drive(engine, timer, level, false, gap);
}

//! Time abstraction traits for platform-agnostic timing.
//!
//! The engine never reads a clock directly. It asks a [`TimeSource`] for the
//! current [`TimeInstant`] once per [`update`](crate::ButtonEventEngine::update)
//! and compares elapsed [`TimeDuration`]s against its configured thresholds.
//! Time sources must be monotonic; wraparound is not handled.

/// Trait for abstracting time sources.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant.
    fn now(&self) -> I;
}

/// Trait abstraction for duration types.
pub trait TimeDuration: Copy + PartialEq + PartialOrd {
    /// Zero duration constant.
    const ZERO: Self;

    /// Converts duration to milliseconds.
    fn as_millis(&self) -> u64;

    /// Creates duration from milliseconds.
    fn from_millis(millis: u64) -> Self;

    /// Saturating subtraction (returns ZERO on underflow).
    fn saturating_sub(self, other: Self) -> Self;
}

/// Trait abstraction for instant types.
pub trait TimeInstant: Copy {
    /// Duration type for this instant.
    type Duration: TimeDuration;

    /// Calculates duration since an earlier instant.
    ///
    /// Implementations should saturate to `ZERO` if `earlier` is in the future.
    fn duration_since(&self, earlier: Self) -> Self::Duration;
}

impl TimeDuration for core::time::Duration {
    const ZERO: Self = core::time::Duration::ZERO;

    fn as_millis(&self) -> u64 {
        core::time::Duration::as_millis(self) as u64
    }

    fn from_millis(millis: u64) -> Self {
        core::time::Duration::from_millis(millis)
    }

    fn saturating_sub(self, other: Self) -> Self {
        core::time::Duration::saturating_sub(self, other)
    }
}

/// Millisecond duration for hosts that only expose a raw tick counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MillisDuration(pub u64);

impl TimeDuration for MillisDuration {
    const ZERO: Self = MillisDuration(0);

    fn as_millis(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        MillisDuration(millis)
    }

    fn saturating_sub(self, other: Self) -> Self {
        MillisDuration(self.0.saturating_sub(other.0))
    }
}

/// Millisecond timestamp, e.g. the value of a free-running `millis()` counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Millis(pub u64);

impl TimeInstant for Millis {
    type Duration = MillisDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        MillisDuration(self.0.saturating_sub(earlier.0))
    }
}

#[cfg(feature = "std")]
impl TimeInstant for std::time::Instant {
    type Duration = core::time::Duration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        self.saturating_duration_since(earlier)
    }
}

/// Time source backed by [`std::time::Instant`].
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, Default)]
pub struct StdClock;

#[cfg(feature = "std")]
impl TimeSource<std::time::Instant> for StdClock {
    fn now(&self) -> std::time::Instant {
        std::time::Instant::now()
    }
}

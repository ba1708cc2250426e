//! Command-based control for button engines.

use crate::time::TimeDuration;

/// Configuration and reset operations that can be sent to an engine.
///
/// Useful when the engine is owned by one task and another task wants to
/// change its timings or clear its counters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EngineAction<D: TimeDuration> {
    /// Set debounce delay.
    SetDebounceDelay(D),
    /// Set long-press threshold.
    SetLongPressTime(D),
    /// Set double-click window.
    SetDoubleClickInterval(D),
    /// Set hold repeat interval.
    SetHoldInterval(D),
    /// Zero the press counter.
    ResetCounter,
    /// Clear the toggle state.
    ResetToggle,
}

//! Timing configuration for the button engine.

use crate::time::TimeDuration;
use crate::types::ActiveLevel;

/// Default debounce stability window in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 50;

/// Default long-press threshold in milliseconds.
pub const DEFAULT_LONG_PRESS_MS: u64 = 1000;

/// Default release-to-press window for double-clicks in milliseconds.
pub const DEFAULT_DOUBLE_CLICK_MS: u64 = 300;

/// Default repeat interval for hold actions in milliseconds.
pub const DEFAULT_HOLD_INTERVAL_MS: u64 = 100;

/// Engine-wide timing defaults.
///
/// Bindings registered with their own timing override these values for that
/// binding only.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonConfig<D: TimeDuration> {
    /// How long the raw level must stay unchanged before it is accepted.
    pub debounce_delay: D,

    /// Press duration after which `LongPress` fires.
    pub long_press_time: D,

    /// Maximum release-to-press gap for a `DoubleClick`.
    pub double_click_interval: D,

    /// Repeat period of `Hold` while the button stays pressed.
    pub hold_interval: D,

    /// Electrical level that means "pressed".
    pub active_level: ActiveLevel,
}

impl<D: TimeDuration> Default for ButtonConfig<D> {
    /// - debounce: 50ms
    /// - long press: 1000ms
    /// - double click: 300ms
    /// - hold: 100ms
    fn default() -> Self {
        Self {
            debounce_delay: D::from_millis(DEFAULT_DEBOUNCE_MS),
            long_press_time: D::from_millis(DEFAULT_LONG_PRESS_MS),
            double_click_interval: D::from_millis(DEFAULT_DOUBLE_CLICK_MS),
            hold_interval: D::from_millis(DEFAULT_HOLD_INTERVAL_MS),
            active_level: ActiveLevel::High,
        }
    }
}

impl<D: TimeDuration> ButtonConfig<D> {
    /// Creates a configuration with the default timings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the debounce delay.
    pub fn with_debounce_delay(mut self, delay: D) -> Self {
        self.debounce_delay = delay;
        self
    }

    /// Sets the long-press threshold.
    pub fn with_long_press_time(mut self, time: D) -> Self {
        self.long_press_time = time;
        self
    }

    /// Sets the double-click window.
    pub fn with_double_click_interval(mut self, interval: D) -> Self {
        self.double_click_interval = interval;
        self
    }

    /// Sets the hold repeat interval.
    pub fn with_hold_interval(mut self, interval: D) -> Self {
        self.hold_interval = interval;
        self
    }

    /// Sets which electrical level counts as pressed.
    pub fn with_active_level(mut self, level: ActiveLevel) -> Self {
        self.active_level = level;
        self
    }
}

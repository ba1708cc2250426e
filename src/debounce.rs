//! Stability-timer debouncer and edge detector.
//!
//! A raw level is accepted once it has stayed unchanged for at least the
//! debounce delay. Any change of the raw level restarts the timer, so a signal
//! that keeps flipping faster than the delay never produces an edge.

use crate::time::TimeInstant;

/// Accepted transition of the debounced level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Released to pressed.
    Press,
    /// Pressed to released.
    Release,
}

/// Debounce state for a single input.
///
/// Works on logical levels (`true` = pressed); active-level mapping happens
/// before samples reach it.
#[derive(Debug, Clone, Copy)]
pub struct Debouncer<I: TimeInstant> {
    last_sample: bool,
    stable: bool,
    last_change: Option<I>,
}

impl<I: TimeInstant> Default for Debouncer<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: TimeInstant> Debouncer<I> {
    /// Creates a debouncer that starts out released.
    pub const fn new() -> Self {
        Self {
            last_sample: false,
            stable: false,
            last_change: None,
        }
    }

    /// Feeds one sample and returns the edge accepted by it, if any.
    ///
    /// The first call anchors the stability timer at `now`.
    pub fn sample(&mut self, pressed: bool, now: I, delay: I::Duration) -> Option<Edge> {
        if pressed != self.last_sample {
            self.last_change = Some(now);
        }
        self.last_sample = pressed;

        let changed_at = *self.last_change.get_or_insert(now);
        let since_change = now.duration_since(changed_at);

        if since_change >= delay && pressed != self.stable {
            self.stable = pressed;
            return Some(if pressed { Edge::Press } else { Edge::Release });
        }

        None
    }

    /// Returns the accepted (debounced) level.
    #[inline]
    pub fn is_pressed(&self) -> bool {
        self.stable
    }

    /// Returns the most recent raw sample.
    #[inline]
    pub fn last_sample(&self) -> bool {
        self.last_sample
    }
}
